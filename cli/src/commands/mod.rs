pub mod jobs;
pub mod run;

pub use self::jobs::jobs;
pub use self::run::run;
