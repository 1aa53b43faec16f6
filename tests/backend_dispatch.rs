use dual_atomic::backend::{self, Backend};
use dual_atomic::AtomicBase;

#[test]
fn host_build_never_selects_device() {
    assert!(!backend::ACTIVE.is_device());
    #[cfg(all(not(target_env = "msvc"), any(target_family = "unix", target_env = "gnu")))]
    {
        assert_eq!(backend::ACTIVE, Backend::Builtin);
        assert!(backend::ACTIVE.has_native_load());
    }
    #[cfg(target_env = "msvc")]
    assert_eq!(backend::ACTIVE, Backend::Interlocked);
}

#[test]
fn backend_serializes_as_name() {
    assert_eq!(serde_json::to_string(&Backend::Interlocked).unwrap(), "\"interlocked\"");
    assert_eq!(
        serde_json::to_string(&backend::active()).unwrap(),
        format!("\"{}\"", backend::ACTIVE)
    );
}

#[test]
fn dispatch_functions_share_the_wrapper_cell() {
    let a = AtomicBase::new(0i64);
    let p = a.as_ptr();
    // SAFETY: `p` is `a`'s aligned cell, alive for the whole test.
    unsafe {
        backend::store(p, 100);
        assert_eq!(backend::fetch_sub(p, 150), 100);
    }
    assert_eq!(a.load(), -50);
    assert_eq!(a.fetch_add(50), -50);
    // SAFETY: as above.
    assert_eq!(unsafe { backend::load(p) }, 0);
}

#[test]
fn widths_dispatch_independently() {
    let narrow = AtomicBase::new(u32::MAX);
    let wide = AtomicBase::new(u64::from(u32::MAX));
    narrow.post_increment();
    wide.post_increment();
    assert_eq!(narrow.load(), 0);
    assert_eq!(wide.load(), 1 << 32);
}
