pub mod font;
pub mod interrupt;
pub mod mode;
pub mod scroll;
pub mod script;
pub mod session;
pub mod shared;
pub mod speed;
pub mod surface;

pub use font::{Font, FontSize, FontSizeController, FontWeight};
pub use mode::{Mode, ModeStateMachine, Transition};
pub use scroll::{ScrollEngine, ScrollSettings, ScrollState, ScrollTick, StepOutcome};
pub use session::{Teleprompter, TeleprompterSettings};
pub use shared::SharedState;
pub use speed::{ScrollSpeed, ScrollSpeedController, SpeedInput};
pub use surface::{DisplaySurface, EditSurface, SurfaceError};
