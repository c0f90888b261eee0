pub mod analyst;
pub mod editor;
pub mod pipeline;
pub mod throttle;

pub use analyst::TopicAnalyst;
pub use editor::Editor;
pub use pipeline::{Pipeline, StageEvent, StageRunner};
pub use throttle::Throttle;

pub mod prelude {
    pub use super::pipeline::{Pipeline, StageEvent};
    pub use super::throttle::Throttle;
    pub use nd_core::{Error, FailureClass, NewsState, Result, Stage, Topic};
}
