//! Middleware de CORS
//!
//! Las apps móviles y el panel web pegan desde orígenes distintos; la
//! capa responde el preflight OPTIONS (204) antes de llegar a los
//! handlers. Permite cualquier origen - solo para desarrollo.

use tower_http::cors::CorsLayer;

pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
