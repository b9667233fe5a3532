pub mod billing;
pub mod db;
pub mod llm;
pub mod remote;
pub mod storage;
