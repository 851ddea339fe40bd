//! DTOs del sweep de monitoreo

use serde::Serialize;

/// Resumen de un sweep: cuántas sesiones se evaluaron y cuántas
/// notificaciones quedaron insertadas.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SweepSummary {
    pub success: bool,
    pub sessions_checked: usize,
    pub notifications_sent: usize,
}
