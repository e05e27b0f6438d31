mod decision;
mod side;
mod transaction;

pub use decision::Decision;
pub use side::Side;
pub use transaction::Transaction;
