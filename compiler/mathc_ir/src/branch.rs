//! Contains the definition of [`BranchSet`], the set of parallel candidate
//! expressions produced by multi-valued operators.

use std::collections::BTreeMap;

use getset::Getters;

use crate::fragment::Fragment;

/// One candidate output expression.
#[derive(Debug, Clone, PartialEq, Default, Getters)]
pub struct Branch {
    /// The code of the branch.
    #[get = "pub"]
    fragments: Vec<Fragment>,

    /// Which branch of each referenced external equation this branch is
    /// paired with, keyed by external index.
    #[get = "pub"]
    selections: BTreeMap<usize, usize>,
}

impl Branch {
    fn push(&mut self, fragment: Fragment) {
        if let (Some(Fragment::Number(previous)), Fragment::Number(text)) =
            (self.fragments.last_mut(), &fragment)
        {
            previous.push_str(text);
            return;
        }

        self.fragments.push(fragment);
    }

    /// Consumes the branch and returns its code.
    #[must_use]
    pub fn into_fragments(self) -> Vec<Fragment> { self.fragments }
}

/// The live branches of the equation being compiled.
///
/// # Invariants
///
/// There is always at least one branch. The order of the branches is the
/// cartesian product of the alternatives in encounter order: the most recently
/// encountered multi-valued operator varies slowest.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchSet {
    branches: Vec<Branch>,
}

impl Default for BranchSet {
    fn default() -> Self { Self { branches: vec![Branch::default()] } }
}

impl BranchSet {
    /// Returns the number of live branches.
    #[must_use]
    pub fn len(&self) -> usize { self.branches.len() }

    /// Always `false`: a branch set holds at least one branch.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.branches.is_empty() }

    /// Returns the live branches.
    #[must_use]
    pub fn branches(&self) -> &[Branch] { &self.branches }

    /// Consumes the set and returns the branches.
    #[must_use]
    pub fn into_branches(self) -> Vec<Branch> { self.branches }

    /// Appends the fragment to every branch.
    pub fn push(&mut self, fragment: &Fragment) {
        for branch in &mut self.branches {
            branch.push(fragment.clone());
        }
    }

    /// Replaces every branch with one copy per alternative, each suffixed by
    /// that alternative.
    ///
    /// The outer loop runs over the alternatives and the inner loop over the
    /// existing branches.
    pub fn multiply(&mut self, alternatives: &[Fragment]) {
        self.cartesian(alternatives.len(), |branch, index| {
            branch.push(alternatives[index].clone());
        });
    }

    /// Pairs every branch with one of the `count` branches of the external
    /// equation at index `external`.
    ///
    /// The first selection multiplies the set by `count`; later selections of
    /// the same external reuse the pairing and leave the set untouched.
    pub fn select(&mut self, external: usize, count: usize) {
        if self
            .branches
            .first()
            .is_some_and(|branch| branch.selections.contains_key(&external))
        {
            return;
        }

        self.cartesian(count, |branch, index| {
            branch.selections.insert(external, index);
        });
    }

    /// Appends the fragment produced from each branch's selection of the
    /// external equation at index `external`.
    ///
    /// # Panics
    ///
    /// If [`Self::select`] was not called for `external` beforehand.
    pub fn push_selected(
        &mut self,
        external: usize,
        fragment: impl Fn(usize) -> Fragment,
    ) {
        for branch in &mut self.branches {
            let selected = branch.selections[&external];
            branch.push(fragment(selected));
        }
    }

    fn cartesian(&mut self, count: usize, mut apply: impl FnMut(&mut Branch, usize)) {
        let base = std::mem::take(&mut self.branches);
        let mut branches = Vec::with_capacity(base.len() * count);

        for index in 0..count {
            for branch in &base {
                let mut branch = branch.clone();
                apply(&mut branch, index);
                branches.push(branch);
            }
        }

        self.branches = branches;
    }
}
