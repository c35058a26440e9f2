pub mod build_plan;
pub mod buildpack_toml;
pub mod package_json;
