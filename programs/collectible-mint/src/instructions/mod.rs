pub mod effects;
pub mod gift;
pub mod initialize;
pub mod mint_tokens;
pub mod queries;
pub mod set_allow_list_root;
pub mod set_sale_phase;
pub mod withdraw;

pub use gift::*;
pub use initialize::*;
pub use mint_tokens::*;
pub use queries::*;
pub use set_allow_list_root::*;
pub use set_sale_phase::*;
pub use withdraw::*;
