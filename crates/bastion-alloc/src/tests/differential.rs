// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Random operation sequences checked against `Vec` and `String`.

use alloc::string::String;

use proptest::prelude::*;

use super::tracked;
use crate::{SecretString, SecretVec};

#[derive(Clone, Debug)]
enum VecOp {
    Push(u8),
    Pop,
    Insert(usize, u8),
    InsertSlice(usize, Vec<u8>),
    ExtendFromWithin(usize, usize),
    InsertFromWithin(usize, usize, usize),
    Erase(usize),
    EraseRange(usize, usize),
    Truncate(usize),
    Resize(usize, u8),
    AssignSlice(Vec<u8>),
    ShrinkToFit,
    Clear,
}

fn vec_op() -> impl Strategy<Value = VecOp> {
    prop_oneof![
        any::<u8>().prop_map(VecOp::Push),
        Just(VecOp::Pop),
        (0usize..48, any::<u8>()).prop_map(|(i, v)| VecOp::Insert(i, v)),
        (0usize..48, prop::collection::vec(any::<u8>(), 0..8))
            .prop_map(|(i, s)| VecOp::InsertSlice(i, s)),
        (0usize..48, 0usize..48).prop_map(|(a, b)| VecOp::ExtendFromWithin(a, b)),
        (0usize..48, 0usize..48, 0usize..48)
            .prop_map(|(i, a, b)| VecOp::InsertFromWithin(i, a, b)),
        (0usize..48).prop_map(VecOp::Erase),
        (0usize..48, 0usize..48).prop_map(|(a, b)| VecOp::EraseRange(a, b)),
        (0usize..48).prop_map(VecOp::Truncate),
        (0usize..48, any::<u8>()).prop_map(|(n, v)| VecOp::Resize(n, v)),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(VecOp::AssignSlice),
        Just(VecOp::ShrinkToFit),
        Just(VecOp::Clear),
    ]
}

/// Applies `op` to both containers. Errors must coincide with the model rejecting it.
fn apply_vec(op: &VecOp, secret: &mut SecretVec<u8>, model: &mut Vec<u8>) {
    let len = model.len();

    match *op {
        VecOp::Push(v) => {
            secret.push(v).expect("push");
            model.push(v);
        }
        VecOp::Pop => assert_eq!(secret.pop(), model.pop()),
        VecOp::Insert(i, v) => {
            let result = secret.insert(i, v);
            if i <= len {
                assert_eq!(result, Ok(i));
                model.insert(i, v);
            } else {
                assert!(result.is_err());
            }
        }
        VecOp::InsertSlice(i, ref src) => {
            let result = secret.insert_slice(i, src);
            if i <= len {
                assert_eq!(result, Ok(i));
                model.splice(i..i, src.iter().copied());
            } else {
                assert!(result.is_err());
            }
        }
        VecOp::ExtendFromWithin(a, b) => {
            let result = secret.extend_from_within(a..b);
            if a <= b && b <= len {
                assert!(result.is_ok());
                model.extend_from_within(a..b);
            } else {
                assert!(result.is_err());
            }
        }
        VecOp::InsertFromWithin(i, a, b) => {
            let result = secret.insert_from_within(i, a..b);
            if a <= b && b <= len && i <= len {
                assert_eq!(result, Ok(i));
                let copied: Vec<u8> = model[a..b].to_vec();
                model.splice(i..i, copied);
            } else {
                assert!(result.is_err());
            }
        }
        VecOp::Erase(i) => {
            let result = secret.erase(i);
            if i < len {
                assert_eq!(result, Ok(i));
                model.remove(i);
            } else {
                assert!(result.is_err());
            }
        }
        VecOp::EraseRange(a, b) => {
            let result = secret.erase_range(a..b);
            if a <= b && b <= len {
                assert_eq!(result, Ok(a));
                model.drain(a..b);
            } else {
                assert!(result.is_err());
            }
        }
        VecOp::Truncate(n) => {
            secret.truncate(n);
            model.truncate(n);
        }
        VecOp::Resize(n, v) => {
            secret.resize(n, v).expect("resize");
            model.resize(n, v);
        }
        VecOp::AssignSlice(ref src) => {
            secret.assign_slice(src).expect("assign");
            model.clear();
            model.extend_from_slice(src);
        }
        VecOp::ShrinkToFit => {
            secret.shrink_to_fit().expect("shrink");
            assert_eq!(secret.capacity(), model.len());
        }
        VecOp::Clear => {
            secret.clear();
            model.clear();
        }
    }
}

#[derive(Clone, Debug)]
enum StrOp {
    Push(char),
    PushStr(String),
    Insert(usize, char),
    InsertStr(usize, String),
    AppendSelf,
    Pop,
    Remove(usize),
    Truncate(usize),
    Assign(String),
    Clear,
}

fn str_op() -> impl Strategy<Value = StrOp> {
    prop_oneof![
        any::<char>().prop_map(StrOp::Push),
        "[a-zé🔑]{0,6}".prop_map(StrOp::PushStr),
        (0usize..40, any::<char>()).prop_map(|(i, c)| StrOp::Insert(i, c)),
        (0usize..40, "[a-zñ]{0,4}").prop_map(|(i, s)| StrOp::InsertStr(i, s)),
        Just(StrOp::AppendSelf),
        Just(StrOp::Pop),
        (0usize..40).prop_map(StrOp::Remove),
        (0usize..40).prop_map(StrOp::Truncate),
        "[a-z]{0,12}".prop_map(StrOp::Assign),
        Just(StrOp::Clear),
    ]
}

fn apply_str(op: &StrOp, secret: &mut SecretString, model: &mut String) {
    let len = model.len();

    match op {
        StrOp::Push(c) => {
            secret.push(*c).expect("push");
            model.push(*c);
        }
        StrOp::PushStr(s) => {
            secret.push_str(s).expect("push_str");
            model.push_str(s);
        }
        StrOp::Insert(i, c) => {
            let result = secret.insert(*i, *c);
            if model.is_char_boundary(*i) {
                assert!(result.is_ok());
                model.insert(*i, *c);
            } else {
                assert!(result.is_err());
            }
        }
        StrOp::InsertStr(i, s) => {
            let result = secret.insert_str(*i, s);
            if model.is_char_boundary(*i) {
                assert!(result.is_ok());
                model.insert_str(*i, s);
            } else {
                assert!(result.is_err());
            }
        }
        StrOp::AppendSelf => {
            secret.append_self().expect("append_self");
            let copy = model.clone();
            model.push_str(&copy);
        }
        StrOp::Pop => assert_eq!(secret.pop(), model.pop()),
        StrOp::Remove(i) => {
            let result = secret.remove(*i);
            if *i < len && model.is_char_boundary(*i) {
                assert_eq!(result, Ok(model.remove(*i)));
            } else {
                assert!(result.is_err());
            }
        }
        StrOp::Truncate(n) => {
            let result = secret.truncate(*n);
            if *n >= len || model.is_char_boundary(*n) {
                assert!(result.is_ok());
                model.truncate(*n);
            } else {
                assert!(result.is_err());
            }
        }
        StrOp::Assign(s) => {
            secret.assign(s).expect("assign");
            model.clone_from(s);
        }
        StrOp::Clear => {
            secret.clear();
            model.clear();
        }
    }
}

proptest! {
    #[test]
    fn prop_secret_vec_matches_vec(ops in prop::collection::vec(vec_op(), 0..64)) {
        let (counter, alloc) = tracked();

        {
            let mut secret = SecretVec::new_in(alloc);
            let mut model = Vec::new();

            for op in &ops {
                apply_vec(op, &mut secret, &mut model);
                prop_assert_eq!(secret.as_slice(), model.as_slice());
                prop_assert!(secret.len() <= secret.capacity());
                prop_assert_eq!(counter.outstanding(), secret.capacity() as isize);
            }
        }

        prop_assert_eq!(counter.outstanding(), 0);
    }

    #[test]
    fn prop_secret_string_matches_string(ops in prop::collection::vec(str_op(), 0..48)) {
        let mut secret = SecretString::new();
        let mut model = String::new();

        for op in &ops {
            apply_str(op, &mut secret, &mut model);
            prop_assert_eq!(secret.as_str(), model.as_str());

            if secret.is_bound() {
                let with_nul = secret.as_bytes_with_nul().expect("bound");
                prop_assert_eq!(with_nul.last(), Some(&0));
                prop_assert_eq!(with_nul.len(), model.len() + 1);
            }
        }
    }
}
