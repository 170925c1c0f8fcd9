pub mod jne;
pub mod select;
pub mod tokopedia;
