//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, ErrorResponse,
    GenerateKeyRequest, GenerateKeyResponse, HashRequest, HashResponse, HealthResponse,
    SignRequest, SignResponse, VerifyHashRequest, VerifyResponse, VerifySignRequest,
};
use common::ServiceError;
use hashkit::{CryptoError, EncryptionAlgorithm, DEFAULT_KEY_SIZE};
use tracing::warn;

use super::state::AppState;

/// Largest key `POST /keys` will generate, in bytes.
pub const MAX_KEY_SIZE: usize = 1024;

/// [`ServiceError`] rendered as a JSON [`ErrorResponse`].
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl From<CryptoError> for ApiError {
    fn from(e: CryptoError) -> Self {
        warn!(kind = e.kind(), "crypto operation failed");
        Self(ServiceError::from(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// `POST /keys` — generate a random base64 key.
pub async fn generate_key(
    State(state): State<AppState>,
    Json(req): Json<GenerateKeyRequest>,
) -> ApiResult<GenerateKeyResponse> {
    let size = req.size.unwrap_or(DEFAULT_KEY_SIZE);
    if size == 0 || size > MAX_KEY_SIZE {
        return Err(ServiceError::BadRequest(format!(
            "size must be between 1 and {MAX_KEY_SIZE} bytes"
        ))
        .into());
    }
    let key = state.kit.generate_key(size)?;
    Ok(Json(GenerateKeyResponse { key }))
}

/// `POST /hash` — one-way digest of `data`.
pub async fn hash(State(state): State<AppState>, Json(req): Json<HashRequest>) -> Json<HashResponse> {
    let algorithm = state.algorithm(req.algorithm);
    Json(HashResponse {
        hash: hashkit::hash(&req.data, algorithm),
    })
}

/// `POST /hash/verify` — check `data` against a digest.
pub async fn verify_hash(
    State(state): State<AppState>,
    Json(req): Json<VerifyHashRequest>,
) -> Json<VerifyResponse> {
    let algorithm = state.algorithm(req.algorithm);
    Json(VerifyResponse {
        valid: hashkit::verify_hash(&req.data, &req.hash, algorithm),
    })
}

/// `POST /sign` — HMAC of `data` under the service signing secret.
pub async fn sign(State(state): State<AppState>, Json(req): Json<SignRequest>) -> Json<SignResponse> {
    let algorithm = state.algorithm(req.algorithm);
    Json(SignResponse {
        signature: hashkit::sign(&req.data, state.keys.signing_secret(), algorithm),
    })
}

/// `POST /sign/verify` — constant-time check of a signature.
pub async fn verify_sign(
    State(state): State<AppState>,
    Json(req): Json<VerifySignRequest>,
) -> Json<VerifyResponse> {
    let algorithm = state.algorithm(req.algorithm);
    Json(VerifyResponse {
        valid: hashkit::verify_sign(
            &req.data,
            &req.signature,
            state.keys.signing_secret(),
            algorithm,
        ),
    })
}

/// `POST /encrypt` — encrypt `data` under the service key.
pub async fn encrypt(
    State(state): State<AppState>,
    Json(req): Json<EncryptRequest>,
) -> ApiResult<EncryptResponse> {
    let payload = state.kit.encrypt(
        &req.data,
        state.keys.encryption_key(),
        EncryptionAlgorithm::default(),
    )?;
    Ok(Json(EncryptResponse { payload }))
}

/// `POST /decrypt` — verify and decrypt a token issued by `/encrypt`.
///
/// Tokens with a bad MAC are rejected with 422 before any decryption happens.
pub async fn decrypt(
    State(state): State<AppState>,
    Json(req): Json<DecryptRequest>,
) -> ApiResult<DecryptResponse> {
    let data = state.kit.decrypt(
        &req.payload,
        state.keys.encryption_key(),
        EncryptionAlgorithm::default(),
    )?;
    Ok(Json(DecryptResponse { data }))
}

/// `GET /health` — liveness check.
///
/// Keys are validated before the listener binds, so a running server is ready.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        routing::{get, post},
        Router,
    };
    use axum_test::TestServer;
    use hashkit::{EncryptedPayload, HashAlgorithm};
    use serde_json::json;

    fn server_with(state: AppState) -> TestServer {
        let app = Router::new()
            .route("/keys", post(generate_key))
            .route("/hash", post(hash))
            .route("/hash/verify", post(verify_hash))
            .route("/sign", post(sign))
            .route("/sign/verify", post(verify_sign))
            .route("/encrypt", post(encrypt))
            .route("/decrypt", post(decrypt))
            .route("/health", get(health))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    fn server() -> TestServer {
        server_with(AppState::for_tests())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let resp = server().get("/health").await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<HealthResponse>().status, "ok");
    }

    #[tokio::test]
    async fn generate_key_default_size() {
        let resp = server().post("/keys").json(&json!({})).await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<GenerateKeyResponse>().key.len(), 44);
    }

    #[tokio::test]
    async fn generate_key_rejects_zero_size() {
        let resp = server().post("/keys").json(&json!({"size": 0})).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<ErrorResponse>().code, "bad_request");
    }

    #[tokio::test]
    async fn generate_key_rejects_oversized() {
        let resp = server()
            .post("/keys")
            .json(&json!({"size": MAX_KEY_SIZE + 1}))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn hash_uses_default_algorithm() {
        let resp = server().post("/hash").json(&json!({"data": "abc"})).await;
        resp.assert_status_ok();
        assert_eq!(
            resp.json::<HashResponse>().hash,
            hashkit::hash("abc", HashAlgorithm::Sha256)
        );
    }

    #[tokio::test]
    async fn hash_honours_requested_algorithm() {
        let resp = server()
            .post("/hash")
            .json(&json!({"data": "abc", "algorithm": "sha384"}))
            .await;
        assert_eq!(resp.json::<HashResponse>().hash.len(), 96);
    }

    #[tokio::test]
    async fn configured_default_algorithm_applies() {
        let mut state = AppState::for_tests();
        state.default_algorithm = HashAlgorithm::Sha512;
        let resp = server_with(state).post("/hash").json(&json!({"data": "abc"})).await;
        assert_eq!(resp.json::<HashResponse>().hash.len(), 128);
    }

    #[tokio::test]
    async fn verify_hash_round_trip() {
        let server = server();
        let hashed = server
            .post("/hash")
            .json(&json!({"data": "password324"}))
            .await
            .json::<HashResponse>()
            .hash;
        let resp = server
            .post("/hash/verify")
            .json(&json!({"data": "password324", "hash": hashed}))
            .await;
        assert!(resp.json::<VerifyResponse>().valid);
    }

    #[tokio::test]
    async fn sign_uses_service_secret() {
        let resp = server().post("/sign").json(&json!({"data": "password123"})).await;
        resp.assert_status_ok();
        assert_eq!(
            resp.json::<SignResponse>().signature,
            hashkit::sign("password123", "test-signing-secret", HashAlgorithm::Sha256)
        );
    }

    #[tokio::test]
    async fn verify_sign_rejects_forgery() {
        let server = server();
        let resp = server
            .post("/sign/verify")
            .json(&json!({"data": "password123", "signature": "00"}))
            .await;
        resp.assert_status_ok();
        assert!(!resp.json::<VerifyResponse>().valid);
    }

    #[tokio::test]
    async fn encrypt_then_decrypt() {
        let server = server();
        let token = server
            .post("/encrypt")
            .json(&json!({"data": "password432423"}))
            .await
            .json::<EncryptResponse>()
            .payload;
        let resp = server.post("/decrypt").json(&json!({"payload": token})).await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<DecryptResponse>().data, "password432423");
    }

    #[tokio::test]
    async fn decrypt_rejects_tampered_token() {
        let server = server();
        let token = server
            .post("/encrypt")
            .json(&json!({"data": "secret"}))
            .await
            .json::<EncryptResponse>()
            .payload;
        let mut payload = EncryptedPayload::from_token(&token).unwrap();
        payload.mac = "0".repeat(64);
        let resp = server
            .post("/decrypt")
            .json(&json!({"payload": payload.to_token()}))
            .await;
        resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(resp.json::<ErrorResponse>().code, "integrity_failure");
    }

    #[tokio::test]
    async fn decrypt_rejects_other_service_key() {
        let token = server()
            .post("/encrypt")
            .json(&json!({"data": "secret"}))
            .await
            .json::<EncryptResponse>()
            .payload;
        let resp = server().post("/decrypt").json(&json!({"payload": token})).await;
        resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn decrypt_rejects_garbage() {
        let resp = server()
            .post("/decrypt")
            .json(&json!({"payload": "not a token"}))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }
}
