use core::ffi::{c_int, c_long, c_longlong, c_uint, c_ulong, c_ulonglong};

use dual_atomic::{
    Atomic, AtomicBase, AtomicInt, AtomicLlong, AtomicLong, AtomicSizeT, AtomicUint,
    AtomicUllong, AtomicUlong,
};

macro_rules! surface_test {
    ($name:ident, $atomic:ty, $t:ty) => {
        #[test]
        fn $name() {
            let a = <$atomic>::default();
            assert_eq!(a.load(), 0);

            a.store(5);
            assert_eq!(a.load(), 5);
            assert_eq!(<$t>::from(&a), 5);
            assert_eq!(a.assign(9), 9);

            assert_eq!(a.fetch_add(3), 9);
            assert_eq!(a.fetch_sub(2), 12);
            assert_eq!(a.load(), 10);

            assert_eq!(a.post_increment(), 10);
            assert_eq!(a.pre_increment(), 12);
            assert_eq!(a.post_decrement(), 12);
            assert_eq!(a.pre_decrement(), 10);
            assert_eq!(a.into_inner(), 10);
        }
    };
}

surface_test!(int_surface, AtomicInt, c_int);
surface_test!(uint_surface, AtomicUint, c_uint);
surface_test!(long_surface, AtomicLong, c_long);
surface_test!(ulong_surface, AtomicUlong, c_ulong);
surface_test!(llong_surface, AtomicLlong, c_longlong);
surface_test!(ullong_surface, AtomicUllong, c_ulonglong);
surface_test!(size_t_surface, AtomicSizeT, usize);
surface_test!(base_i32_surface, AtomicBase<i32>, i32);
surface_test!(base_u64_surface, AtomicBase<u64>, u64);

#[test]
fn store_then_load_round_trips_extremes() {
    let a = Atomic::new(0i32);
    for v in [i32::MIN, -1, 0, 1, i32::MAX] {
        a.store(v);
        assert_eq!(a.load(), v);
    }

    let b = Atomic::new(0u64);
    for v in [0, 1, u64::MAX / 2, u64::MAX] {
        b.store(v);
        assert_eq!(b.load(), v);
    }
}

#[test]
fn signed_fetch_add_of_negative_values() {
    let a = AtomicLlong::new(10);
    assert_eq!(a.fetch_add(-15), 10);
    assert_eq!(a.load(), -5);
    assert_eq!(a.fetch_sub(-5), -5);
    assert_eq!(a.load(), 0);
}

#[test]
fn signed_overflow_wraps() {
    let a = AtomicInt::new(c_int::MAX);
    assert_eq!(a.post_increment(), c_int::MAX);
    assert_eq!(a.load(), c_int::MIN);
    assert_eq!(a.pre_decrement(), c_int::MAX);

    let b = AtomicBase::new(i64::MIN);
    assert_eq!(b.fetch_sub(1), i64::MIN);
    assert_eq!(b.load(), i64::MAX);
}

#[test]
fn unsigned_wraparound() {
    let a = AtomicUint::new(0);
    assert_eq!(a.pre_decrement(), c_uint::MAX);
    assert_eq!(a.fetch_add(2), c_uint::MAX);
    assert_eq!(a.load(), 1);

    let b = AtomicSizeT::new(usize::MAX);
    assert_eq!(b.pre_increment(), 0);
    assert_eq!(b.load(), 0);
}

#[test]
fn pre_increment_result_is_not_a_reread() {
    // The returned value is `previous + 1` computed locally; an interleaved write
    // between the fetch and the return is not reflected in it. Single-context runs
    // can only check the arithmetic, which is the contract callers rely on.
    let a = AtomicUllong::new(u64::MAX - 1);
    assert_eq!(a.pre_increment(), u64::MAX);
    assert_eq!(a.pre_increment(), 0);
    assert_eq!(a.load(), 0);
}

#[test]
fn value_copy_is_independent() {
    let a = AtomicLong::new(7);
    let b = AtomicLong::new(a.load());
    b.fetch_add(1);
    assert_eq!(a.load(), 7);
    assert_eq!(b.load(), 8);
}
