use serde::{Deserialize, Serialize};

/// Typed view of the `buildpack.toml` shipped next to the binary.
#[derive(Debug, Deserialize, Serialize)]
pub struct BuildpackToml {
    pub api: String,
    pub buildpack: Buildpack,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Buildpack {
    pub id: String,
    pub name: String,
    pub version: String,
}
