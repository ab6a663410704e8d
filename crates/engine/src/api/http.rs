//! HTTP routes.
//!
//! Fight endpoints are open; character endpoints act on behalf of the
//! [`CurrentUser`] and only ever see that user's characters.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use arena_domain::{AttackAction, Character, CharacterId, UserId};

use super::auth::CurrentUser;
use super::dto::{
    AddCharacterRequest, AddWeaponRequest, AttackResultDto, CharacterDto, FightRequest,
    FightResultDto, HighscoreDto, LearnSkillRequest, SkillAttackRequest, SkillDto,
    UpdateCharacterRequest, WeaponAttackRequest,
};
use super::json::ApiJson;
use super::response::ServiceResponse;
use crate::app::App;
use crate::use_cases::character::CharacterError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/fight", post(fight))
        .route("/api/fight/weapon", post(weapon_attack))
        .route("/api/fight/skill", post(skill_attack))
        .route("/api/fight/highscores", get(highscores))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/{id}",
            get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
        .route("/api/characters/{id}/weapon", post(add_weapon))
        .route("/api/characters/{id}/skills", post(learn_skill))
        .route("/api/skills", get(list_skills))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Fights
// =============================================================================

async fn weapon_attack(
    State(app): State<Arc<App>>,
    ApiJson(req): ApiJson<WeaponAttackRequest>,
) -> ServiceResponse<AttackResultDto> {
    app.use_cases
        .fight
        .resolve_attack
        .execute(AttackAction::weapon(req.attacker_id, req.opponent_id))
        .await
        .map(|r| AttackResultDto::from(&r))
        .into()
}

async fn skill_attack(
    State(app): State<Arc<App>>,
    ApiJson(req): ApiJson<SkillAttackRequest>,
) -> ServiceResponse<AttackResultDto> {
    app.use_cases
        .fight
        .resolve_attack
        .execute(AttackAction::skill(
            req.attacker_id,
            req.opponent_id,
            req.skill_id,
        ))
        .await
        .map(|r| AttackResultDto::from(&r))
        .into()
}

async fn fight(
    State(app): State<Arc<App>>,
    ApiJson(req): ApiJson<FightRequest>,
) -> ServiceResponse<FightResultDto> {
    app.use_cases
        .fight
        .run_fight
        .execute(&req.character_ids)
        .await
        .map(|r| FightResultDto::from(&r))
        .into()
}

async fn highscores(State(app): State<Arc<App>>) -> ServiceResponse<Vec<HighscoreDto>> {
    app.use_cases
        .fight
        .highscores
        .execute()
        .await
        .map(|entries| entries.into_iter().map(HighscoreDto::from).collect())
        .into()
}

// =============================================================================
// Characters
// =============================================================================

fn to_dtos(characters: &[Character]) -> Vec<CharacterDto> {
    characters.iter().map(CharacterDto::from).collect()
}

async fn owned_list(app: &App, owner: UserId) -> Result<Vec<CharacterDto>, CharacterError> {
    let characters = app.use_cases.characters.list(owner).await?;
    Ok(to_dtos(&characters))
}

async fn list_characters(
    State(app): State<Arc<App>>,
    CurrentUser(owner): CurrentUser,
) -> ServiceResponse<Vec<CharacterDto>> {
    owned_list(&app, owner).await.into()
}

async fn get_character(
    State(app): State<Arc<App>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<CharacterId>,
) -> ServiceResponse<CharacterDto> {
    app.use_cases
        .characters
        .get(owner, id)
        .await
        .map(|c| CharacterDto::from(&c))
        .into()
}

/// Responds with the caller's full roster, new character included.
async fn create_character(
    State(app): State<Arc<App>>,
    CurrentUser(owner): CurrentUser,
    ApiJson(req): ApiJson<AddCharacterRequest>,
) -> ServiceResponse<Vec<CharacterDto>> {
    let result = async {
        app.use_cases.characters.create(owner, req.into()).await?;
        owned_list(&app, owner).await
    };
    result.await.into()
}

async fn update_character(
    State(app): State<Arc<App>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<CharacterId>,
    ApiJson(req): ApiJson<UpdateCharacterRequest>,
) -> ServiceResponse<CharacterDto> {
    app.use_cases
        .characters
        .update(owner, id, req.into())
        .await
        .map(|c| CharacterDto::from(&c))
        .into()
}

/// Responds with the characters the caller has left.
async fn delete_character(
    State(app): State<Arc<App>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<CharacterId>,
) -> ServiceResponse<Vec<CharacterDto>> {
    let result = async {
        app.use_cases.characters.delete(owner, id).await?;
        owned_list(&app, owner).await
    };
    result.await.into()
}

async fn add_weapon(
    State(app): State<Arc<App>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<CharacterId>,
    ApiJson(req): ApiJson<AddWeaponRequest>,
) -> ServiceResponse<CharacterDto> {
    app.use_cases
        .characters
        .equip_weapon(owner, id, req.name, req.damage)
        .await
        .map(|c| CharacterDto::from(&c))
        .into()
}

async fn learn_skill(
    State(app): State<Arc<App>>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<CharacterId>,
    ApiJson(req): ApiJson<LearnSkillRequest>,
) -> ServiceResponse<CharacterDto> {
    app.use_cases
        .characters
        .learn_skill(owner, id, req.skill_id)
        .await
        .map(|c| CharacterDto::from(&c))
        .into()
}

async fn list_skills(State(app): State<Arc<App>>) -> ServiceResponse<Vec<SkillDto>> {
    app.use_cases
        .characters
        .list_skills()
        .await
        .map(|skills| skills.iter().map(SkillDto::from).collect())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::USER_ID_HEADER;
    use crate::app::Repositories;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::sqlite::SqliteRepositories;
    use arena_domain::FightConfig;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        _dir: TempDir,
    }

    /// Router over a fresh SQLite file. The RNG always rolls `roll`.
    async fn test_app(roll: u32) -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("arena.db").display());
        let clock = Arc::new(FixedClock(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
        let repos = SqliteRepositories::open(&url, clock.clone()).await.unwrap();
        let app = App::with_ports(
            Repositories {
                character: repos.character,
                skill: repos.skill,
                record: repos.record,
            },
            clock,
            Arc::new(FixedRandom(roll)),
            FightConfig::default(),
        );
        TestApp {
            router: routes().with_state(Arc::new(app)),
            _dir: dir,
        }
    }

    impl TestApp {
        async fn send(
            &self,
            method: &str,
            uri: &str,
            user: Option<UserId>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(user) = user {
                builder = builder.header(USER_ID_HEADER, user.to_string());
            }
            let request = match body {
                Some(body) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, json)
        }

        /// Create a character and return its id.
        async fn create(&self, owner: UserId, body: Value) -> String {
            let body_name = body["name"].clone();
            let (status, json) = self
                .send("POST", "/api/characters", Some(owner), Some(body))
                .await;
            assert_eq!(status, StatusCode::OK, "{json}");
            let roster = json["data"].as_array().unwrap();
            let created = roster.iter().find(|c| c["name"] == body_name).unwrap();
            created["id"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn health_check() {
        let app = test_app(0).await;
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn character_endpoints_require_a_user() {
        let app = test_app(0).await;
        let (status, _) = app.send("GET", "/api/characters", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn characters_are_scoped_to_their_owner() {
        let app = test_app(0).await;
        let owner = UserId::new();
        let id = app.create(owner, json!({ "name": "Frodo" })).await;

        let uri = format!("/api/characters/{id}");
        let (status, json) = app.send("GET", &uri, Some(owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Frodo");
        assert_eq!(json["data"]["hitPoints"], 100);
        assert_eq!(json["data"]["class"], "Knight");

        let (status, json) = app.send("GET", &uri, Some(UserId::new()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Character not found"));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let app = test_app(0).await;
        let owner = UserId::new();
        let keep = app.create(owner, json!({ "name": "Sam" })).await;
        let gone = app.create(owner, json!({ "name": "Pippin" })).await;

        let (status, json) = app
            .send(
                "PUT",
                &format!("/api/characters/{keep}"),
                Some(owner),
                Some(json!({ "strength": 25, "class": "Cleric" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["strength"], 25);
        assert_eq!(json["data"]["class"], "Cleric");

        let (status, json) = app
            .send("DELETE", &format!("/api/characters/{gone}"), Some(owner), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let remaining = json["data"].as_array().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["id"], keep.as_str());
    }

    #[tokio::test]
    async fn weapon_attack_reports_damage_and_persists_hit_points() {
        // Weapon 5 + minimum roll 1 - defence 3.
        let app = test_app(0).await;
        let owner = UserId::new();
        let attacker = app
            .create(owner, json!({ "name": "Aragorn", "strength": 10 }))
            .await;
        let defender = app
            .create(owner, json!({ "name": "Orc", "hitPoints": 20, "defence": 3 }))
            .await;
        app.send(
            "POST",
            &format!("/api/characters/{attacker}/weapon"),
            Some(owner),
            Some(json!({ "name": "Anduril", "damage": 5 })),
        )
        .await;

        let (status, json) = app
            .send(
                "POST",
                "/api/fight/weapon",
                None,
                Some(json!({ "attackerId": attacker, "opponentId": defender })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        let data = &json["data"];
        assert_eq!(data["attacker"], "Aragorn");
        assert_eq!(data["opponent"], "Orc");
        assert_eq!(data["action"], "Anduril");
        assert_eq!(data["damage"], 3);
        assert_eq!(data["opponentHP"], 17);
        assert_eq!(data["attackerVictorious"], false);

        let (_, json) = app
            .send("GET", &format!("/api/characters/{defender}"), Some(owner), None)
            .await;
        assert_eq!(json["data"]["hitPoints"], data["opponentHP"]);
    }

    #[tokio::test]
    async fn skill_attack_with_unlearned_skill_is_rejected() {
        let app = test_app(0).await;
        let owner = UserId::new();
        let attacker = app.create(owner, json!({ "name": "Gandalf" })).await;
        let defender = app.create(owner, json!({ "name": "Balrog" })).await;

        let (_, skills) = app.send("GET", "/api/skills", None, None).await;
        let fireball = skills["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == "Fireball")
            .unwrap()["id"]
            .clone();

        let (status, json) = app
            .send(
                "POST",
                "/api/fight/skill",
                None,
                Some(json!({ "attackerId": attacker, "opponentId": defender, "skillId": fireball })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["data"], Value::Null);

        let (_, json) = app
            .send("GET", &format!("/api/characters/{defender}"), Some(owner), None)
            .await;
        assert_eq!(json["data"]["hitPoints"], 100);
    }

    #[tokio::test]
    async fn full_fight_updates_the_highscores() {
        let app = test_app(0).await;
        let owner = UserId::new();
        let strong = app.create(owner, json!({ "name": "Boromir" })).await;
        let weak = app
            .create(owner, json!({ "name": "Gollum", "hitPoints": 10 }))
            .await;
        app.send(
            "POST",
            &format!("/api/characters/{strong}/weapon"),
            Some(owner),
            Some(json!({ "name": "Horn", "damage": 50 })),
        )
        .await;

        let (status, json) = app
            .send(
                "POST",
                "/api/fight",
                None,
                Some(json!({ "characterIds": [strong, weak] })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["winner"], "Boromir");
        assert_eq!(json["data"]["rounds"], 1);
        let log = json["data"]["log"].as_array().unwrap();
        assert_eq!(log.last().unwrap(), "Boromir wins with 100 HP left!");

        let (status, json) = app.send("GET", "/api/fight/highscores", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let board = json["data"].as_array().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0]["name"], "Boromir");
        assert_eq!(board[0]["victories"], 1);
        assert_eq!(board[0]["rank"], 1);
        assert_eq!(board[1]["defeats"], 1);
    }

    #[tokio::test]
    async fn fight_with_unknown_character_is_not_found() {
        let app = test_app(0).await;
        let owner = UserId::new();
        let real = app.create(owner, json!({ "name": "Legolas" })).await;

        let (status, json) = app
            .send(
                "POST",
                "/api/fight",
                None,
                Some(json!({ "characterIds": [real, CharacterId::new()] })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);

        let (_, json) = app.send("GET", "/api/fight/highscores", None, None).await;
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_in_the_envelope() {
        let app = test_app(0).await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/characters")
            .header(USER_ID_HEADER, UserId::new().to_string())
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).expect("json envelope");
        assert_eq!(json["success"], false);
        assert_eq!(json["data"], Value::Null);
        assert!(!json["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn body_missing_a_field_is_unprocessable() {
        let app = test_app(0).await;
        let (status, json) = app
            .send(
                "POST",
                "/api/fight/weapon",
                None,
                Some(json!({ "attackerId": CharacterId::new() })),
            )
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
        assert_eq!(json["data"], Value::Null);
    }
}
