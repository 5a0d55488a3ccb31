pub const API_NAME: &str = "[CAR-REGISTRY]";
