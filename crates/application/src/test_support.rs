//! In-memory doubles shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use rulecheck_domain::{ApiResponse, ClientRecord};

use crate::ports::{
    ClientInterceptor, ClientProvider, ResponsePrinter, ResponseRecorder, ResponseSender,
};
use crate::sandbox::Sandbox;

#[derive(Default)]
pub struct MemoryRecorder {
    calls: Mutex<Vec<ApiResponse>>,
}

impl ResponseSender for MemoryRecorder {
    fn send(&self, response: ApiResponse) {
        self.calls.lock().expect("Lock poisoned").push(response);
    }
}

impl ResponseRecorder for MemoryRecorder {
    fn calls(&self) -> Vec<ApiResponse> {
        self.calls.lock().expect("Lock poisoned").clone()
    }

    fn reset(&self) {
        self.calls.lock().expect("Lock poisoned").clear();
    }
}

#[derive(Default)]
pub struct MemoryClients {
    current: Mutex<Option<ClientRecord>>,
}

impl ClientProvider for MemoryClients {
    fn current_client(&self) -> Option<ClientRecord> {
        self.current.lock().expect("Lock poisoned").clone()
    }
}

impl ClientInterceptor for MemoryClients {
    fn set_current_client(&self, client: ClientRecord) {
        *self.current.lock().expect("Lock poisoned") = Some(client);
    }

    fn is_intercepted(&self) -> bool {
        self.current.lock().expect("Lock poisoned").is_some()
    }

    fn reset(&self) {
        *self.current.lock().expect("Lock poisoned") = None;
    }
}

#[derive(Default)]
pub struct MemoryPrinter {
    lines: Mutex<Vec<String>>,
}

impl MemoryPrinter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("Lock poisoned").clone()
    }
}

impl ResponsePrinter for MemoryPrinter {
    fn print_line(&self, line: &str) {
        self.lines.lock().expect("Lock poisoned").push(line.to_string());
    }
}

pub fn memory_sandbox() -> Sandbox {
    Sandbox::new(Arc::new(MemoryRecorder::default()), Arc::new(MemoryClients::default()))
}
