pub mod app;
pub mod header;
pub mod approval_card;
pub mod delegation_form;
pub mod transaction_status;
pub mod delegation_info;

pub use app::render_app;
pub use header::render_header;
pub use approval_card::render_approval_card;
pub use delegation_form::render_delegation_form;
pub use transaction_status::render_transaction_status;
pub use delegation_info::render_delegation_info;
