pub mod destroy;
