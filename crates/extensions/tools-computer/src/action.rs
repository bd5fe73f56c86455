//! Action requests and their shape validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use deskpilot_protocols::error::ToolError;

use crate::backend::ClickKind;

/// Every action the computer tool understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Key,
    Type,
    MouseMove,
    LeftClick,
    LeftClickDrag,
    RightClick,
    MiddleClick,
    DoubleClick,
    Screenshot,
    CursorPosition,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Key,
        Action::Type,
        Action::MouseMove,
        Action::LeftClick,
        Action::LeftClickDrag,
        Action::RightClick,
        Action::MiddleClick,
        Action::DoubleClick,
        Action::Screenshot,
        Action::CursorPosition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Type => "type",
            Self::MouseMove => "mouse_move",
            Self::LeftClick => "left_click",
            Self::LeftClickDrag => "left_click_drag",
            Self::RightClick => "right_click",
            Self::MiddleClick => "middle_click",
            Self::DoubleClick => "double_click",
            Self::Screenshot => "screenshot",
            Self::CursorPosition => "cursor_position",
        }
    }
}

impl FromStr for Action {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ToolError::InvalidAction(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request as received from the caller.
///
/// `text` and `coordinate` are kept as raw JSON so that a wrongly typed value
/// is reported as a validation failure of that field rather than a parse
/// error of the whole request. `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Value>,
}

/// A request whose shape matches its action. Coordinates are still in the
/// caller's space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    MouseMove { x: u32, y: u32 },
    LeftClickDrag { x: u32, y: u32 },
    Key { chord: String },
    Type { text: String },
    Click(ClickKind),
    Screenshot,
    CursorPosition,
}

impl ActionRequest {
    pub fn new(action: Action) -> Self {
        Self {
            action: action.as_str().to_string(),
            text: None,
            coordinate: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(Value::String(text.into()));
        self
    }

    pub fn with_coordinate(mut self, x: u32, y: u32) -> Self {
        self.coordinate = Some(Value::from(vec![x, y]));
        self
    }

    /// Parse tool parameters. Only the outer shape is checked here.
    pub fn from_value(params: Value) -> Result<Self, ToolError> {
        serde_json::from_value(params).map_err(|e| ToolError::ValidationFailed(e.to_string()))
    }

    /// Check the request against its action's requirements.
    pub fn validate(&self) -> Result<ValidatedAction, ToolError> {
        let action: Action = self.action.parse()?;
        let text = present(&self.text);
        let coordinate = present(&self.coordinate);

        match action {
            Action::MouseMove | Action::LeftClickDrag => {
                let Some(coordinate) = coordinate else {
                    return Err(invalid(format!("coordinate is required for {}", action)));
                };
                if text.is_some() {
                    return Err(invalid(format!("text is not accepted for {}", action)));
                }
                let (x, y) = parse_coordinate(coordinate)?;
                Ok(if action == Action::MouseMove {
                    ValidatedAction::MouseMove { x, y }
                } else {
                    ValidatedAction::LeftClickDrag { x, y }
                })
            }
            Action::Key | Action::Type => {
                let Some(text) = text else {
                    return Err(invalid(format!("text is required for {}", action)));
                };
                if coordinate.is_some() {
                    return Err(invalid(format!("coordinate is not accepted for {}", action)));
                }
                let Value::String(text) = text else {
                    return Err(invalid("text must be a string".to_string()));
                };
                Ok(if action == Action::Key {
                    ValidatedAction::Key {
                        chord: text.clone(),
                    }
                } else {
                    ValidatedAction::Type { text: text.clone() }
                })
            }
            _ => {
                if text.is_some() {
                    return Err(invalid(format!("text is not accepted for {}", action)));
                }
                if coordinate.is_some() {
                    return Err(invalid(format!("coordinate is not accepted for {}", action)));
                }
                Ok(match action {
                    Action::LeftClick => ValidatedAction::Click(ClickKind::Left),
                    Action::RightClick => ValidatedAction::Click(ClickKind::Right),
                    Action::MiddleClick => ValidatedAction::Click(ClickKind::Middle),
                    Action::DoubleClick => ValidatedAction::Click(ClickKind::Double),
                    Action::Screenshot => ValidatedAction::Screenshot,
                    _ => ValidatedAction::CursorPosition,
                })
            }
        }
    }
}

fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}

fn invalid(message: String) -> ToolError {
    ToolError::ValidationFailed(message)
}

fn parse_coordinate(value: &Value) -> Result<(u32, u32), ToolError> {
    let items = match value.as_array() {
        Some(items) if items.len() == 2 => items,
        _ => return Err(invalid("coordinate must be an array of length 2".to_string())),
    };
    let component = |v: &Value| v.as_u64().and_then(|n| u32::try_from(n).ok());
    match (component(&items[0]), component(&items[1])) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(invalid(
            "coordinate must be an array of non-negative integers".to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
