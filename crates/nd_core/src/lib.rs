pub mod error;
pub mod models;
pub mod stage;
pub mod state;
pub mod topic;

pub use error::{Error, FailureClass, Result};
pub use models::LanguageModel;
pub use stage::Stage;
pub use state::NewsState;
pub use topic::Topic;

pub mod prelude {
    pub use super::{Error, FailureClass, LanguageModel, NewsState, Result, Stage, Topic};
}
