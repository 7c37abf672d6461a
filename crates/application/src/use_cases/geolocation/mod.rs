mod lookup;

pub use lookup::LookupLocationUseCase;
