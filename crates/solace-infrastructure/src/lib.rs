pub mod config_service;
pub mod json_identity_repository;
pub mod json_profile_repository;
pub mod paths;
pub mod secret_service;
pub mod still_camera;

pub use crate::config_service::ConfigService;
pub use crate::json_identity_repository::JsonIdentityRepository;
pub use crate::json_profile_repository::JsonProfileRepository;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::still_camera::StillImageCamera;
