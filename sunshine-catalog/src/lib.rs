pub mod ticket;
pub mod promotion;
pub mod inventory;

pub use ticket::{TicketCatalog, TicketType, MAX_TICKETS_PER_TYPE};
pub use promotion::Promotion;
pub use inventory::{
    InventoryCategory, InventoryError, InventoryFilter, InventoryItem, InventoryStats,
    InventoryTransaction, NewInventoryItem, StockStatus, TransactionType,
};
