use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use raw_containers::{Error, Vector};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum VecOp {
    Push(i32),
    Pop,
    Insert(usize, i32),
    InsertN(usize, u8, i32),
    InsertFrom(usize, Vec<i32>),
    Resize(u16, i32),
    Reserve(u16),
    AssignN(u8, i32),
    AssignFrom(Vec<i32>),
    At(usize),
    Clear,
}

fn vec_op_strategy() -> impl Strategy<Value = VecOp> {
    prop_oneof![
        10 => any::<i32>().prop_map(VecOp::Push),
        4 => Just(VecOp::Pop),
        4 => (any::<usize>(), any::<i32>()).prop_map(|(i, v)| VecOp::Insert(i, v)),
        2 => (any::<usize>(), any::<u8>(), any::<i32>()).prop_map(|(i, n, v)| VecOp::InsertN(i, n, v)),
        2 => (any::<usize>(), proptest::collection::vec(any::<i32>(), 0..16)).prop_map(|(i, v)| VecOp::InsertFrom(i, v)),
        1 => (0u16..512, any::<i32>()).prop_map(|(n, v)| VecOp::Resize(n, v)),
        1 => (0u16..512).prop_map(VecOp::Reserve),
        1 => (any::<u8>(), any::<i32>()).prop_map(|(n, v)| VecOp::AssignN(n, v)),
        1 => proptest::collection::vec(any::<i32>(), 0..64).prop_map(VecOp::AssignFrom),
        3 => any::<usize>().prop_map(VecOp::At),
        1 => Just(VecOp::Clear),
    ]
}

/// Picks a position in `0..=len`, with an occasional one past it.
fn position(raw: usize, len: usize) -> usize {
    raw % (len + 2)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both a `Vector` and a
    /// `std::vec::Vec` and asserts identical contents at every step.
    #[test]
    fn vector_ops_match_vec(ops in proptest::collection::vec(vec_op_strategy(), TEST_SIZE)) {
        let mut vector: Vector<i32> = Vector::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                VecOp::Push(v) => {
                    vector.push(v).unwrap();
                    model.push(v);
                }
                VecOp::Pop => {
                    let expected = model.pop().ok_or(Error::Empty { operation: "pop" });
                    prop_assert_eq!(vector.pop(), expected);
                }
                VecOp::Insert(i, v) => {
                    let i = position(i, model.len());
                    let result = vector.insert(i, v);
                    if i <= model.len() {
                        prop_assert_eq!(result, Ok(i));
                        model.insert(i, v);
                    } else {
                        prop_assert_eq!(result, Err(Error::OutOfRange { index: i, len: model.len() }));
                    }
                }
                VecOp::InsertN(i, n, v) => {
                    let i = position(i, model.len());
                    let result = vector.insert_n(i, usize::from(n), v);
                    if i <= model.len() {
                        prop_assert!(result.is_ok());
                        model.splice(i..i, std::iter::repeat_n(v, usize::from(n)));
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                VecOp::InsertFrom(i, items) => {
                    let i = position(i, model.len());
                    let result = vector.insert_from(i, items.iter().copied());
                    if i <= model.len() {
                        prop_assert!(result.is_ok());
                        model.splice(i..i, items);
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                VecOp::Resize(n, v) => {
                    vector.resize(usize::from(n), v).unwrap();
                    model.resize(usize::from(n), v);
                }
                VecOp::Reserve(n) => {
                    vector.reserve(usize::from(n)).unwrap();
                    prop_assert!(vector.capacity() >= usize::from(n));
                }
                VecOp::AssignN(n, v) => {
                    vector.assign_n(usize::from(n), v).unwrap();
                    model = vec![v; usize::from(n)];
                }
                VecOp::AssignFrom(items) => {
                    vector.assign_from(items.iter().copied()).unwrap();
                    model = items;
                }
                VecOp::At(i) => {
                    let i = i % (model.len() + 1);
                    match model.get(i) {
                        Some(expected) => {
                            prop_assert_eq!(vector.at(i), Ok(expected));
                        }
                        None => {
                            prop_assert_eq!(vector.at(i), Err(Error::OutOfRange { index: i, len: model.len() }));
                        }
                    }
                }
                VecOp::Clear => {
                    let capacity = vector.capacity();
                    vector.clear();
                    model.clear();
                    prop_assert_eq!(vector.capacity(), capacity);
                }
            }

            prop_assert!(vector.len() <= vector.capacity());
            prop_assert_eq!(vector.as_slice(), model.as_slice());
        }
    }

    /// After `k` pushes from empty, the capacity is the smallest power of two `>= k`.
    #[test]
    fn push_capacity_is_power_of_two(k in 1usize..5_000) {
        let mut vector = Vector::new();
        for i in 0..k {
            vector.push(i).unwrap();
        }
        prop_assert_eq!(vector.capacity(), k.next_power_of_two());
    }

    /// Shrinking never changes the capacity.
    #[test]
    fn shrinking_keeps_capacity(len in 0usize..1_000, new_len in 0usize..1_000) {
        prop_assume!(new_len <= len);
        let mut vector = Vector::from_elem(len, 7u64).unwrap();
        let capacity = vector.capacity();
        vector.resize(new_len, 0).unwrap();
        prop_assert_eq!(vector.len(), new_len);
        prop_assert_eq!(vector.capacity(), capacity);
    }

    /// A reserve within the current capacity never relocates.
    #[test]
    fn reserve_within_capacity_is_stable(len in 1usize..1_000, request in 0usize..1_000) {
        prop_assume!(request <= len);
        let mut vector = Vector::from_elem(len, 1u8).unwrap();
        let front = vector.front().unwrap() as *const u8;
        vector.reserve(request).unwrap();
        prop_assert_eq!(vector.front().unwrap() as *const u8, front);
        prop_assert_eq!(vector.capacity(), len);
    }

    /// `from_slice` over a cursor span copies exactly that range.
    #[test]
    fn cursor_span_round_trip(values in proptest::collection::vec(any::<i16>(), 0..200), a in any::<usize>(), b in any::<usize>()) {
        let vector = Vector::from_slice(&values).unwrap();
        let (first, last) = (a % (values.len() + 1), b % (values.len() + 1));
        let (first, last) = (first.min(last), first.max(last));

        let span = vector.cursor_at(first).span(&vector.cursor_at(last));
        let copy = Vector::from_slice(span).unwrap();
        prop_assert_eq!(copy.as_slice(), &values[first..last]);
        prop_assert_eq!(copy.capacity(), last - first);
        let distance = usize::try_from(vector.cursor_at(last) - vector.cursor_at(first)).unwrap();
        prop_assert_eq!(distance, last - first);
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn insert_into_full_vector_doubles() {
    let mut v = Vector::from_elem(10, 0).unwrap();
    assert_eq!(v.capacity(), 10);
    assert_eq!(v.insert(2, 42), Ok(2));
    assert_eq!(v.len(), 11);
    assert_eq!(v.capacity(), 20);
    assert_eq!(v[2], 42);
}

#[test]
fn insert_at_front() {
    let mut v = Vector::from_elem(10, 0).unwrap();
    v.insert(0, 9).unwrap();
    assert_eq!(v.len(), 11);
    assert_eq!(v.front(), Some(&9));
    assert!(v[1..].iter().all(|&x| x == 0));
}

#[test]
fn insert_at_end_is_push() {
    let mut v = Vector::new();
    assert_eq!(v.insert(0, 'a'), Ok(0));
    assert_eq!(v.capacity(), 1);
    assert_eq!(v.insert(1, 'b'), Ok(1));
    assert_eq!(v.capacity(), 2);
    assert_eq!(v, ['a', 'b']);
}

#[test]
fn insert_n_growth() {
    let mut v = Vector::from([1, 2]);
    v.insert_n(1, 10, 0).unwrap();
    assert_eq!(v.len(), 12);
    assert_eq!(v.capacity(), 12);

    let mut v = Vector::from([1, 2, 3, 4]);
    v.insert_n(4, 1, 5).unwrap();
    assert_eq!(v.capacity(), 8);
}

#[test]
fn checked_access_at_len() {
    let v = Vector::from([1, 2, 3]);
    assert_eq!(v.at(2), Ok(&3));
    assert_eq!(v.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    assert_eq!(Vector::<i32>::new().at(0), Err(Error::OutOfRange { index: 0, len: 0 }));
}

#[test]
fn pop_on_empty() {
    let mut v: Vector<String> = Vector::new();
    assert_eq!(v.pop(), Err(Error::Empty { operation: "pop" }));
    assert_eq!(v.front(), None);
    assert_eq!(v.back(), None);
}

#[test]
fn lexicographic_ordering() {
    let a = Vector::from([1, 2, 3, 4, 5]);
    assert!(!(a < Vector::from([1, 2, 3, 4, 0])));
    assert!(a < Vector::from([1, 2, 3, 4, 5, 6]));
    assert!(a <= a.clone());
    assert_ne!(a, Vector::from([1, 2, 3, 4]));
}

#[test]
fn clone_is_independent() {
    let mut source = Vector::from_elem(3, String::from("x")).unwrap();
    source.reserve(10).unwrap();
    let copy = source.clone();
    assert_eq!(copy, source);
    assert_eq!(copy.capacity(), 3);

    source[0].push('y');
    source.push(String::from("z")).unwrap();
    assert_eq!(copy, ["x", "x", "x"].map(String::from));
}

#[test]
fn clone_from_reuses_capacity() {
    let mut target = Vector::from_elem(8, 0).unwrap();
    let source = Vector::from([1, 2, 3]);
    target.clone_from(&source);
    assert_eq!(target, source);
    assert_eq!(target.capacity(), 8);
}

#[test]
fn assign_reallocates_exactly() {
    let mut v = Vector::from([1, 2]);
    v.assign_n(5, 9).unwrap();
    assert_eq!(v, [9; 5]);
    assert_eq!(v.capacity(), 5);
    v.assign_from(0..3).unwrap();
    assert_eq!(v, [0, 1, 2]);
    assert_eq!(v.capacity(), 5);
}

#[test]
fn resize_default_grows_exactly() {
    let mut v: Vector<u8> = Vector::from([1]);
    v.resize_default(4).unwrap();
    assert_eq!(v, [1, 0, 0, 0]);
    assert_eq!(v.capacity(), 4);
}

#[test]
fn swap_exchanges_buffers() {
    let mut a = Vector::from([1, 2, 3]);
    let mut b = Vector::new();
    a.swap_with(&mut b);
    assert!(a.is_empty());
    assert_eq!(a.capacity(), 0);
    assert_eq!(b, [1, 2, 3]);
}

#[test]
fn every_element_is_dropped_once() {
    let tracker = Rc::new(());
    {
        let mut v = Vector::from_elem(5, Rc::clone(&tracker)).unwrap();
        v.insert_n(2, 3, Rc::clone(&tracker)).unwrap();
        v.resize(4, Rc::clone(&tracker)).unwrap();
        v.pop().unwrap();
        assert_eq!(Rc::strong_count(&tracker), 4);

        let mut iter = v.into_iter();
        iter.next().unwrap();
        assert_eq!(Rc::strong_count(&tracker), 3);
    }
    assert_eq!(Rc::strong_count(&tracker), 1);
}

#[test]
fn zero_sized_elements() {
    let mut v = Vector::new();
    for _ in 0..100 {
        v.push(()).unwrap();
    }
    assert_eq!(v.len(), 100);
    assert_eq!(v.max_size(), usize::MAX);
    assert_eq!(v.into_iter().count(), 100);
}

#[test]
fn oversized_requests_fail_cleanly() {
    let mut v = Vector::from([1u64, 2, 3]);
    let max = v.max_size();
    assert_eq!(v.reserve(max + 1), Err(Error::CapacityOverflow { requested: max + 1, max }));
    assert_eq!(v.capacity(), 3);
    assert_eq!(v, [1, 2, 3]);
    assert!(v.resize(usize::MAX, 0).is_err());
    assert_eq!(v.len(), 3);
}

#[test]
fn hash_matches_slice() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    let v = Vector::from([1, 2, 3]);
    assert_eq!(hash_of(&v), hash_of(&[1, 2, 3][..]));
}
