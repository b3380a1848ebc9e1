pub mod body;
pub mod bounds;
pub mod broadphase;
pub mod config;
pub mod contact;
pub mod scene;
pub mod shapes;
