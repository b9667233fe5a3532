pub mod subscription_repository;
