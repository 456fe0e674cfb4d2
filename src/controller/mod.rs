mod format;
mod health_check;
mod home;
mod page;

pub use format::*;
pub use health_check::*;
pub use home::*;
pub use page::*;
