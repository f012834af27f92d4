pub mod audio;
pub mod backend;
pub mod constants;
pub mod driver;
pub mod error;
pub mod impulse;
pub mod paint;
pub mod particles;
pub mod preset;
pub mod session;
pub mod startup;

pub use audio::*;
pub use backend::*;
pub use driver::*;
pub use error::*;
pub use impulse::*;
pub use paint::*;
pub use particles::*;
pub use preset::*;
pub use session::*;
pub use startup::*;
