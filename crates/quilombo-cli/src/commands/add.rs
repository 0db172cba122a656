use std::path::Path;

use quilombo_core::db::{Collection, LibSqlLocalStore, LocalStore};
use quilombo_core::models::{
    record_id, to_record, Anotacao, Cursista, Formador, Record, Reuniao, Supervisor, Tutor,
};
use quilombo_core::util::{local_record_id, now_rfc3339};

use crate::cli::AddCommands;
use crate::commands::common::{open_database, parse_entity};
use crate::error::CliError;

pub async fn run_add(entity: AddCommands, db_path: &Path) -> Result<(), CliError> {
    let (collection, record) = build_record(entity)?;

    let db = open_database(db_path).await?;
    let store = LibSqlLocalStore::new(db.connection());
    store.add(collection, &record).await?;

    println!("{}", record_id(&record).unwrap_or_default());
    Ok(())
}

fn build_record(entity: AddCommands) -> Result<(Collection, Record), CliError> {
    match entity {
        AddCommands::Reuniao {
            titulo,
            data,
            municipio_id,
            secretario,
            email,
            telefone,
            status,
            descricao,
            observacoes,
        } => {
            let reuniao = Reuniao {
                id: local_record_id(),
                titulo,
                descricao,
                data_reuniao: data,
                municipio_id,
                secretario_nome: secretario,
                secretario_email: email,
                secretario_telefone: telefone,
                status,
                observacoes,
                created_at: now_rfc3339(),
                municipios: None,
            };
            Ok((Collection::Reunioes, to_record(&reuniao)?))
        }
        AddCommands::Tutor {
            nome,
            email,
            municipio_id,
            telefone,
            area_atuacao,
            formacao,
            experiencia_anos,
        } => {
            let tutor = Tutor {
                id: local_record_id(),
                nome,
                email,
                telefone,
                municipio_id,
                area_atuacao,
                formacao,
                experiencia_anos,
                created_at: now_rfc3339(),
                municipios: None,
            };
            Ok((Collection::Tutores, to_record(&tutor)?))
        }
        AddCommands::Supervisor {
            nome,
            email,
            municipio_id,
            telefone,
            area_supervisao,
            formacao,
        } => {
            let supervisor = Supervisor {
                id: local_record_id(),
                nome,
                email,
                telefone,
                municipio_id,
                area_supervisao,
                formacao,
                created_at: now_rfc3339(),
                municipios: None,
            };
            Ok((Collection::Supervisores, to_record(&supervisor)?))
        }
        AddCommands::Cursista {
            nome,
            email,
            municipio_id,
            telefone,
            escola,
            cargo,
            curso_interesse,
        } => {
            let cursista = Cursista {
                id: local_record_id(),
                nome,
                email,
                telefone,
                municipio_id,
                escola,
                cargo,
                curso_interesse,
                created_at: now_rfc3339(),
                municipios: None,
            };
            Ok((Collection::Cursistas, to_record(&cursista)?))
        }
        AddCommands::Formador {
            nome,
            email,
            municipio_id,
            telefone,
            especialidade,
            formacao,
            certificacoes,
        } => {
            let formador = Formador {
                id: local_record_id(),
                nome,
                email,
                telefone,
                municipio_id,
                especialidade,
                formacao,
                certificacoes,
                created_at: now_rfc3339(),
                municipios: None,
            };
            Ok((Collection::Formadores, to_record(&formador)?))
        }
        AddCommands::Anotacao {
            entity,
            entity_id,
            titulo,
            conteudo,
            autor,
        } => {
            let kind = parse_entity(&entity)?;
            let anotacao = Anotacao::new_local(kind, entity_id, titulo, conteudo, autor);
            Ok((Collection::Anotacoes, to_record(&anotacao)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilombo_core::models::record_email;

    #[test]
    fn build_record_assigns_local_id_and_created_at() {
        let (collection, record) = build_record(AddCommands::Tutor {
            nome: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            municipio_id: 1,
            telefone: None,
            area_atuacao: None,
            formacao: None,
            experiencia_anos: None,
        })
        .unwrap();

        assert_eq!(collection, Collection::Tutores);
        assert!(record_id(&record).unwrap() > 0);
        assert_eq!(record_email(&record), Some("ana@x.com"));
        assert!(record.contains_key("created_at"));
    }

    #[test]
    fn build_record_maps_annotation_parent() {
        let (collection, record) = build_record(AddCommands::Anotacao {
            entity: "tutor".to_string(),
            entity_id: 42,
            titulo: "Visita".to_string(),
            conteudo: "ok".to_string(),
            autor: "Ana".to_string(),
        })
        .unwrap();

        assert_eq!(collection, Collection::Anotacoes);
        assert_eq!(
            record.get("entity_type").and_then(serde_json::Value::as_str),
            Some("tutores")
        );
        assert_eq!(
            record.get("entity_id").and_then(serde_json::Value::as_i64),
            Some(42)
        );
    }

    #[test]
    fn build_record_rejects_unknown_annotation_parent() {
        let error = build_record(AddCommands::Anotacao {
            entity: "aluno".to_string(),
            entity_id: 1,
            titulo: "t".to_string(),
            conteudo: "c".to_string(),
            autor: "a".to_string(),
        })
        .unwrap_err();

        assert!(matches!(error, CliError::UnknownEntity(_)));
    }
}
