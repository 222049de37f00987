pub mod distribution_mapper;
