pub mod address;
pub mod demo;
pub mod invoice_id;
pub mod keygen;
pub mod pay;
pub mod receive;
