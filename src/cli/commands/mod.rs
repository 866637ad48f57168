mod entities;
mod listen;

pub use entities::{list_entities, select_option, set_humidity, set_number};
pub use listen::listen;
