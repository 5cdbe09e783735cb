use thiserror::Error;

use crate::game::Axis;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unsupported movement: {amount} along {axis:?}")]
    Unsupported { axis: Axis, amount: i32 },
}
