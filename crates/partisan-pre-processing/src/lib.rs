pub mod pre_processor;
