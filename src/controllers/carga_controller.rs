//! Aceptación de carga
//!
//! Cadena de validación fail-fast (solo lecturas) seguida del commit
//! atómico en `EntregaRepository::aceitar`. Cualquier fallo antes del
//! commit deja la base intacta; el commit mismo es todo o nada.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::carga_dto::{AceitarCargaRequest, AceitarCargaResponse};
use crate::models::carroceria::Carroceria;
use crate::models::motorista::{Motorista, TipoCadastroMotorista};
use crate::models::veiculo::Veiculo;
use crate::repositories::carga_repository::CargaRepository;
use crate::repositories::carroceria_repository::CarroceriaRepository;
use crate::repositories::entrega_repository::EntregaRepository;
use crate::repositories::motorista_repository::MotoristaRepository;
use crate::repositories::veiculo_repository::VeiculoRepository;
use crate::utils::errors::AppError;

pub struct CargaController {
    motoristas: MotoristaRepository,
    veiculos: VeiculoRepository,
    carrocerias: CarroceriaRepository,
    cargas: CargaRepository,
    entregas: EntregaRepository,
}

impl CargaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            motoristas: MotoristaRepository::new(pool.clone()),
            veiculos: VeiculoRepository::new(pool.clone()),
            carrocerias: CarroceriaRepository::new(pool.clone()),
            cargas: CargaRepository::new(pool.clone()),
            entregas: EntregaRepository::new(pool),
        }
    }

    pub async fn aceitar(
        &self,
        user_id: Uuid,
        request: AceitarCargaRequest,
    ) -> Result<AceitarCargaResponse, AppError> {
        // 1. Peso finito y positivo
        request.validar_peso()?;

        // 2. Identidad → motorista; solo autónomos aceptan por sí mismos
        let motorista = self
            .motoristas
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::MotoristaNotFound)?;
        validar_autonomo(&motorista)?;

        // 3. Veículo existente y del motorista
        let veiculo = self
            .veiculos
            .find_by_id(request.veiculo_id)
            .await?
            .ok_or(AppError::VeiculoNotFound)?;
        validar_dono_veiculo(&veiculo, motorista.id)?;

        // 4. Carroceria efectiva: propiedad y capacidad
        let carroceria_id = resolver_carroceria_efetiva(&veiculo, request.carroceria_id)?;
        let carroceria = self
            .carrocerias
            .find_by_id(carroceria_id)
            .await?
            .ok_or(AppError::CarroceriaNotFound)?;
        validar_carroceria(&carroceria, motorista.id, request.peso_kg)?;

        // 5. Carga existente, disponible, divisible y con saldo (advisory;
        //    se reevalúa bajo el lock dentro de la transacción)
        let carga = self
            .cargas
            .find_by_id(request.carga_id)
            .await?
            .ok_or(AppError::CargaNotFound)?;
        carga.validar_aceite(request.peso_kg)?;

        // 6. Commit atómico
        let entrega = self
            .entregas
            .aceitar(carga.id, motorista.id, veiculo.id, carroceria_id, request.peso_kg)
            .await?;

        info!(
            "✅ Carga {} aceptada: motorista={} entrega={} peso={}kg",
            carga.codigo, motorista.id, entrega.id, entrega.peso_alocado_kg
        );

        Ok(AceitarCargaResponse { entrega })
    }
}

fn validar_autonomo(motorista: &Motorista) -> Result<(), AppError> {
    if motorista.tipo_cadastro != TipoCadastroMotorista::Autonomo {
        return Err(AppError::OnlyAutonomoCanAccept);
    }
    Ok(())
}

fn validar_dono_veiculo(veiculo: &Veiculo, motorista_id: Uuid) -> Result<(), AppError> {
    if veiculo.motorista_id != Some(motorista_id) {
        return Err(AppError::VeiculoNotOwned);
    }
    Ok(())
}

/// Resolver la carroceria que gobierna esta aceptación.
///
/// Veículo con carroceria integrada: usa la emparejada e ignora la del
/// caller. Veículo con carroceria desmontable: el caller la tiene que
/// mandar.
fn resolver_carroceria_efetiva(
    veiculo: &Veiculo,
    caller_carroceria_id: Option<Uuid>,
) -> Result<Uuid, AppError> {
    if veiculo.carroceria_integrada {
        if let Some(id) = veiculo.carroceria_id {
            return Ok(id);
        }
    }
    caller_carroceria_id.ok_or(AppError::CarroceriaObrigatoria)
}

fn validar_carroceria(
    carroceria: &Carroceria,
    motorista_id: Uuid,
    peso_kg: f64,
) -> Result<(), AppError> {
    if carroceria.motorista_id != Some(motorista_id) {
        return Err(AppError::CarroceriaNotOwned);
    }

    let capacidade_kg = carroceria
        .capacidade_kg
        .ok_or(AppError::CarroceriaSemCapacidade)?;

    if peso_kg > capacidade_kg {
        return Err(AppError::PesoExcedeCarroceria { capacidade_kg });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn motorista(tipo_cadastro: TipoCadastroMotorista) -> Motorista {
        Motorista {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            nome: "João".to_string(),
            tipo_cadastro,
            created_at: Utc::now(),
        }
    }

    fn veiculo(motorista_id: Uuid, integrada: bool, carroceria_id: Option<Uuid>) -> Veiculo {
        Veiculo {
            id: Uuid::new_v4(),
            motorista_id: Some(motorista_id),
            placa: "ABC1D23".to_string(),
            carroceria_integrada: integrada,
            carroceria_id,
            created_at: Utc::now(),
        }
    }

    fn carroceria(motorista_id: Uuid, capacidade_kg: Option<f64>) -> Carroceria {
        Carroceria {
            id: Uuid::new_v4(),
            motorista_id: Some(motorista_id),
            tipo: "graneleira".to_string(),
            capacidade_kg,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_solo_autonomos_aceptan() {
        assert!(validar_autonomo(&motorista(TipoCadastroMotorista::Autonomo)).is_ok());
        assert!(matches!(
            validar_autonomo(&motorista(TipoCadastroMotorista::Frota)),
            Err(AppError::OnlyAutonomoCanAccept)
        ));
    }

    #[test]
    fn test_veiculo_de_otro_motorista_es_rechazado() {
        let dono = Uuid::new_v4();
        let v = veiculo(dono, false, None);

        assert!(validar_dono_veiculo(&v, dono).is_ok());
        assert!(matches!(
            validar_dono_veiculo(&v, Uuid::new_v4()),
            Err(AppError::VeiculoNotOwned)
        ));
    }

    #[test]
    fn test_carroceria_integrada_ignora_la_del_caller() {
        let emparejada = Uuid::new_v4();
        let v = veiculo(Uuid::new_v4(), true, Some(emparejada));

        // Aunque el caller mande otra, gana la emparejada del veículo
        let otra = Uuid::new_v4();
        assert_eq!(resolver_carroceria_efetiva(&v, Some(otra)).unwrap(), emparejada);
        assert_eq!(resolver_carroceria_efetiva(&v, None).unwrap(), emparejada);
    }

    #[test]
    fn test_carroceria_desmontable_exige_la_del_caller() {
        let v = veiculo(Uuid::new_v4(), false, None);

        let caller = Uuid::new_v4();
        assert_eq!(resolver_carroceria_efetiva(&v, Some(caller)).unwrap(), caller);
        assert!(matches!(
            resolver_carroceria_efetiva(&v, None),
            Err(AppError::CarroceriaObrigatoria)
        ));
    }

    #[test]
    fn test_carroceria_sin_capacidad_configurada() {
        let dono = Uuid::new_v4();
        let c = carroceria(dono, None);

        assert!(matches!(
            validar_carroceria(&c, dono, 100.0),
            Err(AppError::CarroceriaSemCapacidade)
        ));
    }

    #[test]
    fn test_peso_sobre_la_capacidad_de_la_carroceria() {
        let dono = Uuid::new_v4();
        let c = carroceria(dono, Some(15000.0));

        assert!(validar_carroceria(&c, dono, 15000.0).is_ok());
        match validar_carroceria(&c, dono, 15000.1) {
            Err(AppError::PesoExcedeCarroceria { capacidade_kg }) => {
                assert_eq!(capacidade_kg, 15000.0);
            }
            other => panic!("se esperaba PesoExcedeCarroceria, se obtuvo {:?}", other.err()),
        }
    }

    #[test]
    fn test_carroceria_de_otro_motorista() {
        let c = carroceria(Uuid::new_v4(), Some(15000.0));
        assert!(matches!(
            validar_carroceria(&c, Uuid::new_v4(), 100.0),
            Err(AppError::CarroceriaNotOwned)
        ));
    }
}
