// ── Utilities ──

pub mod items;
pub mod random;
pub mod timing;

pub use items::{Identified, update_item};
pub use random::{get_random_element, get_random_elements, get_random_integer, get_random_number};
pub use timing::{DEFAULT_DEBOUNCE, Debounced, Throttled, debounce, throttle};
