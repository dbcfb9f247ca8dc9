mod config;
mod inputs;

pub use self::config::load_config;
pub use self::inputs::discover_inputs;
