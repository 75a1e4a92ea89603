//! Command implementations

mod add;
mod clean;
mod download;
mod list;
mod remove;
mod run;
mod update;

pub use add::add;
pub use clean::clean;
pub use download::download;
pub use list::list;
pub use remove::remove;
pub use run::run;
pub use update::update;
