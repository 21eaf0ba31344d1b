//! Backend HTTP contract tests
//!
//! Runs the client against a local mock server and checks:
//! - Bearer token on every authenticated request
//! - Exact batch payloads on the movement endpoints
//! - Error message extraction from rejected requests
//! - Paging and filter parameters of the grids
//! - Data-changed events after successful mutations

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pharmacy_client::grid::GridState;
use pharmacy_client::{ApiClient, ClientError, Resource, Session};
use shared::{
    build_request, AlertSettings, CatalogItem, Credentials, DraftLineBuilder, ItemKind,
    MovementBasket, MovementDirection, MovementHeader, PasswordChange, Sector,
};

const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.test.signature";

fn client_for(server: &MockServer, session: Session) -> ApiClient {
    ApiClient::with_base_url(format!("{}/api", server.uri()), session)
}

fn signed_in(server: &MockServer) -> ApiClient {
    client_for(server, Session::with_token(TOKEN))
}

fn paracetamol_id() -> Uuid {
    Uuid::parse_str("0b7d3c9a-1f00-4c2e-9a41-1c5e7a000001").unwrap()
}

fn icu_id() -> Uuid {
    Uuid::parse_str("0b7d3c9a-1f00-4c2e-9a41-1c5e7a0000aa").unwrap()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/setores"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": icu_id(), "nome": "UTI"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/itens/com-estoque"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": paracetamol_id(), "nome": "Paracetamol 500mg"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server);
    let sectors = client.list_sectors().await.unwrap();
    let items = client.items_with_stock().await.unwrap();

    assert_eq!(sectors, vec![Sector::new(icu_id(), "UTI")]);
    assert_eq!(
        items,
        vec![CatalogItem::new(paracetamol_id(), "Paracetamol 500mg")]
    );
}

#[tokio::test]
async fn test_anonymous_requests_have_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/setores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server, Session::new());
    client.list_sectors().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_stores_token_for_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"login": "ana", "senha": "segredo1"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(TOKEN))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nome": "Ana Lima",
            "login": "ana"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new();
    let client = client_for(&server, session.clone());
    let token = client
        .login(&Credentials {
            login: "ana".into(),
            password: "segredo1".into(),
        })
        .await
        .unwrap();

    assert_eq!(token, TOKEN);
    assert_eq!(session.token().as_deref(), Some(TOKEN));

    let me = client.me().await.unwrap();
    assert_eq!(me.name, "Ana Lima");
}

#[tokio::test]
async fn test_failed_login_keeps_session_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Credenciais invalidas"))
        .mount(&server)
        .await;

    let session = Session::new();
    let client = client_for(&server, session.clone());
    let err = client
        .login(&Credentials {
            login: "ana".into(),
            password: "errada".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    assert_eq!(err.user_message("Login failed"), "Credenciais invalidas");
    assert!(!session.is_authenticated());
}

// ============================================================================
// Movements
// ============================================================================

#[tokio::test]
async fn test_inbound_batch_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/movimentacoes/entrada"))
        .and(body_json(json!({
            "observacao": "",
            "itens": [{
                "itemId": paracetamol_id(),
                "quantidade": 10,
                "numeroLote": "L1",
                "dataValidade": "2026-10-19"
            }]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut builder = DraftLineBuilder::new(MovementDirection::Inbound);
    let mut basket = MovementBasket::new();
    builder.select_item(Some(CatalogItem::new(paracetamol_id(), "Paracetamol")));
    builder.set_quantity(10);
    builder.set_lot_number("L1");
    builder.set_expiry_date(today.succ_opt());
    builder.commit(&mut basket, today).unwrap();

    let request = build_request(&MovementHeader::new(MovementDirection::Inbound), &basket).unwrap();
    signed_in(&server).post_movement(&request).await.unwrap();
}

#[tokio::test]
async fn test_outbound_batch_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/movimentacoes/saida"))
        .and(body_json(json!({
            "observacao": "Plantao noturno",
            "setorId": icu_id(),
            "itens": [{"itemId": paracetamol_id(), "quantidade": 3}]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut builder = DraftLineBuilder::new(MovementDirection::Outbound);
    let mut basket = MovementBasket::new();
    builder.select_item(Some(CatalogItem::new(paracetamol_id(), "Paracetamol")));
    builder.set_quantity(3);
    builder.commit(&mut basket, today).unwrap();

    let mut header = MovementHeader::new(MovementDirection::Outbound);
    header.note = "Plantao noturno".into();
    header.destination = Some(Sector::new(icu_id(), "UTI"));

    let request = build_request(&header, &basket).unwrap();
    signed_in(&server).post_movement(&request).await.unwrap();
}

#[tokio::test]
async fn test_movement_rejection_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/movimentacoes/saida"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Estoque insuficiente"})),
        )
        .mount(&server)
        .await;

    let client = signed_in(&server);
    let mut watcher = client.events().watch(&[Resource::Stock]);

    let mut basket = MovementBasket::new();
    basket.add_line(shared::NewLine {
        item: CatalogItem::new(paracetamol_id(), "Paracetamol"),
        quantity: 999,
        lot: None,
    });
    let mut header = MovementHeader::new(MovementDirection::Outbound);
    header.destination = Some(Sector::new(icu_id(), "UTI"));
    let request = build_request(&header, &basket).unwrap();

    let err = client.post_movement(&request).await.unwrap_err();
    match &err {
        ClientError::Backend { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message.as_deref(), Some("Estoque insuficiente"));
        }
        other => panic!("expected a backend error, got {:?}", other),
    }
    assert_eq!(watcher.try_changed(), None);
}

#[tokio::test]
async fn test_successful_movement_announces_stock_change() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/movimentacoes/saida"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let client = signed_in(&server);
    let mut stock = client.events().watch(&[Resource::Stock]);
    let mut history = client.events().watch(&[Resource::Movements]);
    let mut sectors = client.events().watch(&[Resource::Sectors]);

    let mut basket = MovementBasket::new();
    basket.add_line(shared::NewLine {
        item: CatalogItem::new(paracetamol_id(), "Paracetamol"),
        quantity: 1,
        lot: None,
    });
    let mut header = MovementHeader::new(MovementDirection::Outbound);
    header.destination = Some(Sector::new(icu_id(), "UTI"));
    client
        .post_movement(&build_request(&header, &basket).unwrap())
        .await
        .unwrap();

    assert_eq!(stock.changed().await, Some(Resource::Stock));
    assert_eq!(history.try_changed(), Some(Resource::Movements));
    assert_eq!(sectors.try_changed(), None);
}

#[tokio::test]
async fn test_empty_history_body_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movimentacoes"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let history = signed_in(&server).movement_history().await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_movement_details() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/api/movimentacoes/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "tipoMovimentacao": "SAIDA",
            "dataMovimentacao": "2026-10-18T09:30:00",
            "observacao": null,
            "nomeFuncionario": "Ana Lima",
            "nomeSetor": "UTI",
            "itens": [
                {"nomeItem": "Paracetamol 500mg", "tipoItem": "MEDICAMENTO", "quantidade": 4},
                {"nomeItem": "Gaze", "tipoItem": "INSUMO", "quantidade": 6}
            ]
        })))
        .mount(&server)
        .await;

    let details = signed_in(&server).movement_details(id).await.unwrap();
    assert_eq!(details.sector_name.as_deref(), Some("UTI"));
    assert_eq!(details.items.len(), 2);
    assert_eq!(details.total_quantity(), 10);
}

// ============================================================================
// Grids and forms
// ============================================================================

#[tokio::test]
async fn test_item_grid_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/itens"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .and(query_param("sort", "nome,asc"))
        .and(query_param("dtype", "MEDICAMENTO"))
        .and(query_param("busca", "dipi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "id": paracetamol_id(),
                "nome": "Dipirona",
                "descricaoDetalhada": "Gotas 500mg/ml",
                "unidadeMedida": "FR",
                "estoqueMinimo": 5,
                "ativo": true,
                "dtype": "MEDICAMENTO",
                "tipo": "ORAL"
            }],
            "totalElements": 11
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut grid = GridState::for_items(ItemKind::Medicine);
    grid.set_page(2);
    grid.set_search_input("dipi");
    grid.apply_search();

    let page = signed_in(&server).list_items(&grid.query()).await.unwrap();
    assert_eq!(page.total_elements, 11);
    assert_eq!(page.page_count(grid.page_size()), 2);
    assert_eq!(page.content[0].kind(), ItemKind::Medicine);
}

#[tokio::test]
async fn test_alert_settings_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/configuracoes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "DIAS_ALERTA_VENCIMENTO": "45",
            "LIMITE_ESTOQUE_BAIXO": 12
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/configuracoes"))
        .and(body_json(json!({
            "DIAS_ALERTA_VENCIMENTO": "60",
            "LIMITE_ESTOQUE_BAIXO": "12"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server);
    let mut settings: AlertSettings = client.alert_settings().await.unwrap();
    assert_eq!(settings.expiry_warning_days, 45);

    settings.expiry_warning_days = 60;
    client.save_alert_settings(&settings).await.unwrap();
}

#[tokio::test]
async fn test_password_mismatch_sends_nothing() {
    let server = MockServer::start().await;
    let client = signed_in(&server);

    let err = client
        .change_password(
            &PasswordChange {
                current_password: "antiga1".into(),
                new_password: "nova123".into(),
            },
            "nova124",
        )
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_daily_report_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/relatorios/saidas-diarias"))
        .and(query_param("data", "2026-10-17"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 test".to_vec()))
        .mount(&server)
        .await;

    let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let report = signed_in(&server).daily_outflow_report(date).await.unwrap();
    assert_eq!(report.file_name, "relatorio_saidas_2026-10-17.pdf");
    assert!(report.bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/setores/{}", icu_id())))
        .respond_with(
            ResponseTemplate::new(409).set_body_string("Setor possui movimentacoes"),
        )
        .mount(&server)
        .await;

    let err = signed_in(&server).delete_sector(icu_id()).await.unwrap_err();
    assert_eq!(
        err.user_message("Failed to delete the sector."),
        "Setor possui movimentacoes"
    );
}

#[tokio::test]
async fn test_truncated_error_body_still_reports_status() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        // promises 100 bytes, sends 5, then hangs up
        socket
            .write_all(
                b"HTTP/1.1 409 Conflict\r\ncontent-type: text/plain\r\ncontent-length: 100\r\n\r\nSetor",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = ApiClient::with_base_url(
        format!("http://{}/api", addr),
        Session::with_token(TOKEN),
    );
    let err = client.delete_sector(icu_id()).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.status(), Some(reqwest::StatusCode::CONFLICT));
    assert_eq!(
        err.user_message("Failed to delete the sector."),
        "Failed to delete the sector."
    );
}
