pub mod brasil_api;
