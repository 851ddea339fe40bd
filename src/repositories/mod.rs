//! Repositorios de acceso a datos
//!
//! Cada repositorio es dueño de un PgPool y encapsula el SQL de una
//! entidad. La única escritura multi-fila es la aceptación de carga,
//! que vive en `entrega_repository`.

pub mod carga_repository;
pub mod carroceria_repository;
pub mod entrega_repository;
pub mod localizacao_repository;
pub mod motorista_repository;
pub mod notificacao_repository;
pub mod tracking_repository;
pub mod veiculo_repository;
