#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod firmware;

#[cfg(not(target_os = "none"))]
mod preview;

#[cfg(not(target_os = "none"))]
fn main() -> anyhow::Result<()> {
    preview::run()
}
