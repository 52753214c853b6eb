pub mod ai_service;
pub mod analysis_service;
pub mod answer_validator;
pub mod completion_client;
pub mod data_service;
pub mod dedup_service;
pub mod export_service;
pub mod factual_generator;
pub mod interest_filter;
pub mod pipeline_service;
pub mod quality_service;
pub mod relationship_generator;
pub mod scenario_generator;
