pub mod insurance_queries;
