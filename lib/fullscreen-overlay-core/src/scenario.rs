use crate::document::{render, Document, NodeRef, Selector, SerializedNode};
use crate::overlay::{
    DispatchedAction, OverlayError, OverlayId, OverlayOptions, OverlayPage, TriggerAction,
    TriggerEvent,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Step {step}: nothing matches '{selector}'")]
    NoTarget { step: usize, selector: Selector },
    #[error("Step {step}: {source}")]
    Overlay {
        step: usize,
        #[source]
        source: OverlayError,
    },
}

/// A page, the overlays to attach to it and the interactions to replay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Children of the page body
    pub page: Vec<SerializedNode>,
    pub overlays: Vec<ScenarioOverlay>,
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioOverlay {
    /// Every element matching this gets its own overlay
    pub target: Selector,
    #[serde(default)]
    pub options: OverlayOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    Click { target: Selector },
    KeyPress { target: Selector },
    Open { overlay: OverlayId },
    Close { overlay: OverlayId },
    Destroy { overlay: OverlayId },
    Render,
}

impl fmt::Display for ScenarioStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioStep::Click { target } => write!(f, "click {}", target),
            ScenarioStep::KeyPress { target } => write!(f, "key_press {}", target),
            ScenarioStep::Open { overlay } => write!(f, "open {}", overlay),
            ScenarioStep::Close { overlay } => write!(f, "close {}", overlay),
            ScenarioStep::Destroy { overlay } => write!(f, "destroy {}", overlay),
            ScenarioStep::Render => f.write_str("render"),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: ScenarioStep,
    pub dispatched: Vec<DispatchedAction>,
    pub open: Vec<OverlayId>,
    pub scroll_locked: bool,
    pub rendered: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub attached: Vec<OverlayId>,
    pub steps: Vec<StepReport>,
    pub open: Vec<OverlayId>,
    pub visible: Vec<OverlayId>,
    pub scroll_locked: bool,
    pub rendered: String,
}

/// Replays scenarios against fresh pages built from the current global config
#[derive(Debug, Default)]
pub struct ScenarioRunner;

impl ScenarioRunner {
    pub fn new() -> Self {
        Self
    }

    /// Build the scenario's page and attach its overlays without running any step
    pub fn build_page(&self, scenario: &Scenario) -> (OverlayPage, Vec<OverlayId>) {
        let document = Document::from_serialized(&scenario.page);
        let mut page = OverlayPage::new(document);

        let mut attached = Vec::new();
        for overlay in &scenario.overlays {
            let config = overlay.options.clone().apply(page.default_overlay_config());
            attached.extend(page.attach(&overlay.target, config));
        }

        (page, attached)
    }

    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioReport, ScenarioError> {
        let (mut page, attached) = self.build_page(scenario);
        info!(
            "Attached {} overlay(s), running {} step(s)",
            attached.len(),
            scenario.steps.len()
        );

        let mut steps = Vec::with_capacity(scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            let number = index + 1;
            debug!("Step {}: {}", number, step);

            let dispatched = Self::run_step(&mut page, step).map_err(|e| e.at_step(number))?;

            steps.push(StepReport {
                step: step.clone(),
                dispatched,
                open: page.open_overlays(),
                scroll_locked: page.is_scroll_locked(),
                rendered: render(page.document()),
            });
        }

        Ok(ScenarioReport {
            attached,
            steps,
            open: page.open_overlays(),
            visible: page.visible_overlays(),
            scroll_locked: page.is_scroll_locked(),
            rendered: render(page.document()),
        })
    }

    fn run_step(
        page: &mut OverlayPage,
        step: &ScenarioStep,
    ) -> Result<Vec<DispatchedAction>, StepError> {
        let programmatic = TriggerEvent::programmatic();
        match step {
            ScenarioStep::Click { target } => {
                let node = Self::find(page, target)?;
                Ok(page.dispatch(&TriggerEvent::click(node))?)
            }
            ScenarioStep::KeyPress { target } => {
                let node = Self::find(page, target)?;
                Ok(page.dispatch(&TriggerEvent::key_press(node))?)
            }
            ScenarioStep::Open { overlay } => {
                page.open(*overlay, &programmatic)?;
                Ok(vec![DispatchedAction {
                    overlay: *overlay,
                    action: TriggerAction::Open,
                }])
            }
            ScenarioStep::Close { overlay } => {
                page.close(*overlay, &programmatic)?;
                Ok(vec![DispatchedAction {
                    overlay: *overlay,
                    action: TriggerAction::Close,
                }])
            }
            ScenarioStep::Destroy { overlay } => {
                page.destroy(*overlay)?;
                Ok(Vec::new())
            }
            ScenarioStep::Render => Ok(Vec::new()),
        }
    }

    fn find(page: &OverlayPage, target: &Selector) -> Result<NodeRef, StepError> {
        page.document()
            .query_first(target)
            .ok_or_else(|| StepError::NoTarget(target.clone()))
    }
}

enum StepError {
    NoTarget(Selector),
    Overlay(OverlayError),
}

impl From<OverlayError> for StepError {
    fn from(error: OverlayError) -> Self {
        StepError::Overlay(error)
    }
}

impl StepError {
    fn at_step(self, step: usize) -> ScenarioError {
        match self {
            StepError::NoTarget(selector) => ScenarioError::NoTarget { step, selector },
            StepError::Overlay(source) => ScenarioError::Overlay { step, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r##"
page:
  - id: open-a
    class: full-screen-overlay-open
    text: Open
  - id: panel-a
    children:
      - tag: p
        text: Hello
overlays:
  - target: "#open-a"
    options:
      body_content: "#panel-a"
      fixed_header: true
steps:
  - action: click
    target: "#open-a"
  - action: render
  - action: key_press
    target: .full-screen-overlay-close
"##;

    fn run(yaml: &str) -> Result<ScenarioReport, ScenarioError> {
        let scenario = Scenario::from_yaml(yaml).unwrap();
        ScenarioRunner::new().run(&scenario)
    }

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_yaml(SCENARIO).unwrap();
        assert_eq!(scenario.overlays.len(), 1);
        assert_eq!(
            scenario.steps,
            [
                ScenarioStep::Click {
                    target: Selector::id("open-a")
                },
                ScenarioStep::Render,
                ScenarioStep::KeyPress {
                    target: Selector::class("full-screen-overlay-close")
                },
            ]
        );
        assert_eq!(scenario.steps[0].to_string(), "click #open-a");
    }

    #[test]
    fn test_run_reports_each_step() {
        let report = run(SCENARIO).unwrap();

        assert_eq!(report.attached, vec![0]);
        assert_eq!(report.steps.len(), 3);

        let opened = &report.steps[0];
        assert_eq!(
            opened.dispatched,
            [DispatchedAction {
                overlay: 0,
                action: TriggerAction::Open
            }]
        );
        assert_eq!(opened.open, vec![0]);
        assert!(opened.scroll_locked);
        assert!(opened
            .rendered
            .contains("<body class=\"full-screen-overlay-no-scroll\">"));

        let closed = &report.steps[2];
        assert_eq!(closed.dispatched[0].action, TriggerAction::Close);
        assert!(report.open.is_empty());
        assert!(report.visible.is_empty());
        assert!(!report.scroll_locked);
    }

    #[test]
    fn test_missing_click_target() {
        let result = run("steps:\n  - action: click\n    target: \"#nothing\"\n");
        assert!(matches!(result, Err(ScenarioError::NoTarget { step: 1, .. })));
    }

    #[test]
    fn test_unknown_overlay_step() {
        let result = run("steps:\n  - action: render\n  - action: open\n    overlay: 4\n");
        assert!(matches!(
            result,
            Err(ScenarioError::Overlay {
                step: 2,
                source: OverlayError::UnknownOverlay(4)
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(Scenario::from_yaml("pages: []").is_err());
        assert!(Scenario::from_yaml("steps:\n  - action: hover\n").is_err());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = run(SCENARIO).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0]["step"]["action"], "click");
        assert_eq!(json["steps"][0]["dispatched"][0]["action"], "open");
    }
}
