//! To run the `meraki-cli` binary against the mock service.

use std::{
    collections::HashMap,
    env, fs,
    process::{Command, Output},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use laboratory::{SpecContext, Suite, describe, expect};
use serde_json::{Value, json};
use tokio::{net::TcpListener, runtime::Runtime};

use super::mock;
use crate::TestState;

const STATE: &'static str = "cmd";
const ENV_VARS: [&'static str; 7] = [
    "MERAKI_API_KEY",
    "MERAKI_BASE",
    "MERAKI_ORG",
    "MERAKI_NETWORK",
    "MERAKI_TIMESPAN",
    "LOG_LEVEL",
    "LOG_STYLE",
];

pub fn suite() -> Suite<TestState> {
    describe("meraki-cli", |context| {
        context.it("exit 1 without API key", test_no_key);
        context.it("exit 1 with empty API key", test_empty_key);
        context.it("exit 1 with invalid base", test_invalid_base);
        context.it("traffic", test_traffic);
        context.it("traffic without match", test_traffic_not_found);
        context.it("traffic with non-2xx", test_traffic_err);
        context.it("traffic with non-2xx networks", test_traffic_networks_err);
        context.it("traffic with config file", test_traffic_file);
        context.it("switch settings", test_switch_settings);
        context.it("switch ports", test_switch_ports);
        context.it("switch config", test_switch_config);
        context.it("org list", test_org_list);
        context.it("network list", test_network_list);
        context.it("device list", test_device_list);
        context.it("clients", test_clients);

        context.before_all(before_all_fn).after_all(after_all_fn);
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
    let requests = Arc::new(AtomicUsize::new(0));
    let svc_requests = requests.clone();
    let mock_svc = runtime.spawn(async move {
        if let Err(e) = axum::serve(listener, mock::new_service(svc_requests)).await {
            panic!("mock server error: {}", e);
        }
    });

    state.insert(
        STATE,
        TestState {
            runtime: Some(runtime),
            mock_svc: Some(mock_svc),
            mock_base: Some(format!("http://{}", addr)),
            requests: Some(requests),
        },
    );
}

fn after_all_fn(state: &mut HashMap<&'static str, TestState>) -> () {
    let state = state.get_mut(STATE).unwrap();
    if let Some(svc) = state.mock_svc.take() {
        svc.abort();
    }
}

/// To run the binary with a clean environment of its own variables.
fn run_cli(envs: &[(&str, &str)], args: &[&str]) -> Result<Output, String> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_meraki-cli"));
    for key in ENV_VARS {
        cmd.env_remove(key);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }
    match cmd.args(args).output() {
        Err(e) => Err(format!("run meraki-cli error: {}", e)),
        Ok(output) => Ok(output),
    }
}

fn stdout_json(output: &Output) -> Result<Value, String> {
    match serde_json::from_slice::<Value>(output.stdout.as_slice()) {
        Err(e) => Err(format!(
            "stdout is not JSON: {}, stdout: {}",
            e,
            String::from_utf8_lossy(output.stdout.as_slice())
        )),
        Ok(value) => Ok(value),
    }
}

fn test_no_key(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();
    let requests = state.requests.as_ref().unwrap();

    let before = requests.load(Ordering::SeqCst);
    let output = run_cli(&[("MERAKI_BASE", base)], &["traffic"])?;
    expect(output.status.code()).to_equal(Some(1))?;
    expect(output.stdout.len()).to_equal(0)?;
    expect(output.stderr.len() > 0).to_equal(true)?;
    expect(requests.load(Ordering::SeqCst)).to_equal(before)
}

fn test_empty_key(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();
    let requests = state.requests.as_ref().unwrap();

    let before = requests.load(Ordering::SeqCst);
    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", "")],
        &["switch", "settings"],
    )?;
    expect(output.status.code()).to_equal(Some(1))?;
    expect(output.stdout.len()).to_equal(0)?;
    expect(requests.load(Ordering::SeqCst)).to_equal(before)
}

fn test_invalid_base(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let requests = state.requests.as_ref().unwrap();

    let before = requests.load(Ordering::SeqCst);
    let output = run_cli(
        &[("MERAKI_API_KEY", mock::KEY_VALID)],
        &["--meraki-cli.base", "localhost/api/v1", "traffic"],
    )?;
    expect(output.status.code()).to_equal(Some(1))?;
    expect(output.stdout.len()).to_equal(0)?;
    expect(requests.load(Ordering::SeqCst)).to_equal(before)
}

fn test_traffic(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();
    let requests = state.requests.as_ref().unwrap();

    let before = requests.load(Ordering::SeqCst);
    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["traffic"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(String::from_utf8_lossy(output.stdout.as_slice()).to_string())
        .to_equal("{\n  \"ok\": true\n}\n".to_string())?;
    expect(requests.load(Ordering::SeqCst) - before).to_equal(3)?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["traffic", "-o", "DevNet Sandbox", "-n", "DNSMB5", "-t", "7200"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!({"ok": true}))
}

fn test_traffic_not_found(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();
    let requests = state.requests.as_ref().unwrap();

    let before = requests.load(Ordering::SeqCst);
    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_OTHER_ORG)],
        &["traffic"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)?;
    expect(requests.load(Ordering::SeqCst) - before).to_equal(1)?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["traffic", "-n", "DNSMB6"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)
}

fn test_traffic_err(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", "invalid")],
        &["traffic"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)?;
    let stderr = String::from_utf8_lossy(output.stderr.as_slice()).to_string();
    expect(stderr.contains("401")).to_equal(true)?;
    expect(stderr.contains("Invalid API key")).to_equal(true)?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["traffic", "-n", "Lab"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)
}

fn test_traffic_networks_err(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();
    let requests = state.requests.as_ref().unwrap();

    let before = requests.load(Ordering::SeqCst);
    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_NET_FAIL)],
        &["traffic"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)?;
    expect(requests.load(Ordering::SeqCst) - before).to_equal(2)?;
    let stderr = String::from_utf8_lossy(output.stderr.as_slice()).to_string();
    expect(stderr.contains("unexpected status: 404")).to_equal(true)?;
    expect(stderr.contains("Not found")).to_equal(true)
}

fn test_traffic_file(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();

    let path = env::temp_dir().join(format!("meraki-cli-test-{}.json5", std::process::id()));
    let conf = format!(
        concat!(
            "{{\n",
            "  // mock service\n",
            "  log: {{ level: 'off' }},\n",
            "  merakiCli: {{\n",
            "    base: '{}',\n",
            "    organization: 'DevNet Sandbox',\n",
            "    network: 'DNSMB5',\n",
            "    timespan: 7200,\n",
            "  }},\n",
            "}}\n",
        ),
        base
    );
    if let Err(e) = fs::write(&path, conf) {
        return Err(format!("write config file error: {}", e));
    }
    let path_str = path.to_string_lossy().to_string();
    let output = run_cli(
        &[("MERAKI_API_KEY", mock::KEY_VALID)],
        &["-f", path_str.as_str(), "traffic"],
    );
    let _ = fs::remove_file(&path);
    let output = output?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stderr.len()).to_equal(0)?;
    expect(stdout_json(&output)?).to_equal(json!({"ok": true}))
}

fn test_switch_settings(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["switch", "settings", "-o", "DevNet Sandbox", "-n", "DNSMB5"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!({"vlan": 1, "useCombinedPower": false}))?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["switch", "settings", "-n", "Lab"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)
}

fn test_switch_ports(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();
    let requests = state.requests.as_ref().unwrap();

    let before = requests.load(Ordering::SeqCst);
    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["switch", "ports", "-s", "Q2XX-0001"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!([{"portId": "1", "enabled": true}]))?;
    expect(requests.load(Ordering::SeqCst) - before).to_equal(1)?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["switch", "ports", "-s", "Q2XX-9999"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)
}

fn test_switch_config(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();
    let requests = state.requests.as_ref().unwrap();

    let before = requests.load(Ordering::SeqCst);
    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["switch", "config", "-o", "DevNet Sandbox", "-n", "DNSMB5"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!([{
        "name": "Core Switch",
        "deviceInfo": {"serial": "Q2XX-0001", "model": "MS120-8", "name": "Core Switch"},
        "routingInterfaces": [{"interfaceId": "i1", "vlanId": 10}],
        "ports": [{"portId": "1", "enabled": true}],
        "staticRoutes": [{"staticRouteId": "r1", "subnet": "0.0.0.0/0"}],
        "acls": {"rules": [{"policy": "allow"}]},
    }]))?;
    // organizations, networks, devices, ACLs, then interfaces, ports, static routes of one switch
    expect(requests.load(Ordering::SeqCst) - before).to_equal(7)?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["switch", "config", "-n", "Lab"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)
}

fn test_org_list(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["org", "list"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!([{"id": "1", "name": "DevNet Sandbox"}]))
}

fn test_network_list(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();

    let output = run_cli(
        &[
            ("MERAKI_BASE", base),
            ("MERAKI_API_KEY", mock::KEY_VALID),
            ("MERAKI_ORG", "DevNet Sandbox"),
        ],
        &["network", "list"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!([
        {"id": "N1", "name": "DNSMB5"},
        {"id": "N2", "name": "Lab"},
    ]))?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["network", "list", "-o", "Other"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(output.stdout.len()).to_equal(0)
}

fn test_device_list(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["device", "list"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!([
        {"serial": "Q2XX-0001", "model": "MS120-8", "name": "Core Switch"},
        {"serial": "Q2XX-0002", "model": "MX64"},
    ]))?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["device", "list", "--switches"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!([
        {"serial": "Q2XX-0001", "model": "MS120-8", "name": "Core Switch"},
    ]))
}

fn test_clients(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let base = state.mock_base.as_ref().unwrap().as_str();

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["clients"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!([{"id": "k1", "timespan": "3600"}]))?;

    let output = run_cli(
        &[("MERAKI_BASE", base), ("MERAKI_API_KEY", mock::KEY_VALID)],
        &["clients", "-t", "60"],
    )?;
    expect(output.status.code()).to_equal(Some(0))?;
    expect(stdout_json(&output)?).to_equal(json!([{"id": "k1", "timespan": "60"}]))
}
