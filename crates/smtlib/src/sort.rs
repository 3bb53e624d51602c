/// SMT-LIB sort (type) representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sort {
    /// Boolean sort
    Bool,
    /// Mathematical integer sort
    Int,
    /// Array sort: `(Array index_sort element_sort)`
    Array(Box<Sort>, Box<Sort>),
    /// Uninterpreted function with a domain and codomain.
    ///
    /// Not a first-class SMT-LIB sort; symbols of this sort are declared
    /// with `declare-fun` instead of `declare-const`.
    Function(Vec<Sort>, Box<Sort>),
}

impl Sort {
    /// Build an array sort.
    pub fn array(index: Sort, element: Sort) -> Self {
        Sort::Array(Box::new(index), Box::new(element))
    }

    /// Build an uninterpreted-function sort.
    pub fn function(domain: Vec<Sort>, codomain: Sort) -> Self {
        Sort::Function(domain, Box::new(codomain))
    }

    /// Returns `true` for the function sort.
    pub fn is_function(&self) -> bool {
        matches!(self, Sort::Function(..))
    }
}
