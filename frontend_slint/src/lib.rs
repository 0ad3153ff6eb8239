pub mod runner;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
        if let Err(e) = crate::runner::run() {
            tracing::error!("Frontend stopped: {:#}", e);
        }
    }
}
