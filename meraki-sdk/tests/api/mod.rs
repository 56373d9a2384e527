use std::collections::HashMap;

use laboratory::{Suite, describe};
use tokio::{net::TcpListener, runtime::Runtime};

use meraki_sdk::api::http::{Client, ClientOptions};

use crate::TestState;


const STATE: &'static str = "api";

pub fn suite() -> Suite<TestState> {
    describe("api", |context| {
        context.describe_import(http::suite());
        context.describe_import(organization::suite());
        context.describe_import(network::suite());
        context.describe_import(device::suite());
        context.describe_import(traffic::suite());
        context.describe_import(switch::suite());
        context.describe_import(chain::suite());
    })
}

fn before_all_fn(state: &mut HashMap<&'static str, TestState>) -> () {
    let runtime = match Runtime::new() {
        Err(e) => panic!("create runtime error: {}", e),
        Ok(runtime) => runtime,
    };

    let listener = match runtime.block_on(async { TcpListener::bind("127.0.0.1:0").await }) {
        Err(e) => panic!("bind mock server error: {}", e),
        Ok(listener) => listener,
    };
    let addr = match listener.local_addr() {
        Err(e) => panic!("get mock server address error: {}", e),
        Ok(addr) => addr,
    };
    let mock_svc = runtime.spawn(async move {
        if let Err(e) = axum::serve(listener, mock::new_service()).await {
            panic!("mock server error: {}", e);
        }
    });

    state.insert(
        STATE,
        TestState {
            runtime: Some(runtime),
            mock_svc: Some(mock_svc),
            mock_base: Some(format!("http://{}", addr)),
        },
    );
}

fn after_all_fn(state: &mut HashMap<&'static str, TestState>) -> () {
    let state = state.get_mut(STATE).unwrap();
    if let Some(svc) = state.mock_svc.take() {
        svc.abort();
    }
}

fn new_client(base: &str, api_key: &str) -> Client {
    Client::new(ClientOptions {
        base: base.to_string(),
        api_key: api_key.to_string(),
    })
}
