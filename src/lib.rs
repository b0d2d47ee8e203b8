pub mod config;
pub mod error;
pub mod geometry;
pub mod log;
pub mod playback;
pub mod providers;
pub mod server;
pub mod tools;
pub mod trajectory;
pub mod types;

pub use config::ServerConfig;
pub use error::{ProviderError, ToolError};
pub use log::{InvocationLog, NoopLog, TracingLog};
pub use playback::{Sleeper, TokioSleeper};
pub use providers::Desktop;
pub use server::DesktopServer;
pub use tools::{Catalog, Dispatcher, ResultEnvelope, ToolCall, ToolKind, ToolOutput, ToolResponse};
pub use trajectory::{Step, Trajectory};
pub use types::{Modifier, MouseButton, Point, ScreenSize, ScrollDirection};
