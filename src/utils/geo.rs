//! Cálculo de distancias geodésicas
//!
//! Distancia de círculo máximo (Haversine) entre dos pares (lat, lon).
//! Se usa tanto en la ingesta de localizaciones como en el sweep de
//! monitoreo; no hay cálculo de rutas sobre la red vial, solo línea recta.

/// Radio medio de la Tierra en kilómetros
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia Haversine en kilómetros entre dos coordenadas.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
