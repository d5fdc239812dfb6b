// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod wallet_state;
pub mod app_state;

pub use reactivity::*;
pub use wallet_state::*;
pub use app_state::*;
