pub mod detect;
pub mod llm;
pub mod providers;
pub mod query;
pub mod ranking;
pub mod recommend;
