use super::{AsTargets, DatasetBase, Records};
use ndarray::{ArrayBase, ArrayView1, Data, Ix1};

/// A NdArray can act as targets
impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix1> {
    type Elem = L;

    fn as_targets(&self) -> ArrayView1<'_, L> {
        self.view()
    }
}

impl<T: AsTargets> AsTargets for &T {
    type Elem = T::Elem;

    fn as_targets(&self) -> ArrayView1<'_, Self::Elem> {
        (*self).as_targets()
    }
}

/// A dataset forwards to its targets
impl<R: Records, T: AsTargets> AsTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_targets(&self) -> ArrayView1<'_, Self::Elem> {
        self.targets.as_targets()
    }
}
