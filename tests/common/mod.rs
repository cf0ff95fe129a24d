// Shared fixtures for middleware-gen integration tests
#![allow(dead_code)]

use middleware_gen::config::{GeneratorOptions, InterfaceQuery};
use middleware_gen::testkit::GoPackageFixture;
use std::path::Path;

pub const MODULE: &str = "example.com/fixtures";
pub const PACKAGE: &str = "example.com/fixtures/interfaces";

pub const INTERFACES_GO: &str = r#"package interfaces

import (
	"go/ast"

	"github.com/google/uuid"
)

// TestInterface1 is a dummy interface to test the program output.
// This interface tests //-style method comments.
/* Test comment */
type TestInterface1 interface {
	// Method1 is the first method of TestInterface1.
	Method1(arg1 string, arg2 string) (result string, err error)
	// Method2 is the second method of TestInterface1.
	Method2(arg1 int, arg2 int) (result int, err error)
	/* Method3 is the third method of TestInterface1.
	Continue comment for method */
	Method3(arg1 bool, arg2 bool) (result bool, err error)
}

// EmptyInterface is a dummy interface to test program
type EmptyInterface interface {
}

// UnnammedParameters is a dummy interface to test program
type UnnammedParametersInterface interface {
	UnnammedParameter(string) error
	UnnammedParameters(string, int, int, bool) (bool, string, int, error)
	WithoutReturn(string)
	EmptyMethod()
}

// ImportedParamTypeInterface is a dummy interface to test program
/* Test comment */
type ImportedParamTypeInterface interface {
	// Pointer type param
	PointerTypeParam(typ1 *ast.TypeSpec) *ast.InterfaceType
	// Multiple params with same type
	MultipleParamsWithSameType(typ1, typ2 *ast.TypeSpec, uuid1, uuid2 uuid.UUID) (ret1, ret2 *ast.InterfaceType)
	WithoutParameter() *ast.InterfaceType
	WithoutReturnParameter(*ast.InterfaceType)
}

// VariadicParamTypeInterface is a dummy interface to test program
type VariadicParamTypeInterface interface {
	// Variadic param type
	VariadicFunction(prefix string, values ...int)
	// Variadic param type
	VariadicPointerFunction(values ...*int)
}

// FuncTypeParamsInterface is a dummy interface to test program
type FuncTypeParamsInterface interface {
	// Function param type
	FuncTypeParams(f func(int, *ast.MapType) int, a, b int) func(uuid.UUID) error
}

// CompositeParamsInterface is a dummy interface to test program
type CompositeParamsInterface interface {
	// Map param types
	Map(map[string]uuid.UUID) map[bool]int
	// Slice param types
	Slice([]uuid.UUID, []int) []bool
	// Array param types
	Array(a [3]uuid.UUID) (r [10]bool)
	// Channel param types
	Channel(chan string, <-chan bool, chan<- int) chan int
	// Composite param types
	Composite(m map[string]chan int, d [2]chan func(string) map[bool]*ast.MapType) []chan func(string) error
}

// EmbeddingInterface pulls in methods from other interfaces
type EmbeddingInterface interface {
	Open(name string) error
	Closer
	error
}

// Closer closes things
type Closer interface {
	// Close releases resources
	Close() error
}

// Config is not an interface
type Config struct {
	Name string
}
"#;

pub const AST_GO: &str = "package ast\n\ntype TypeSpec struct{}\n\ntype InterfaceType struct{}\n\ntype MapType struct{}\n";

pub const UUID_GO: &str = "package uuid\n\ntype UUID [16]byte\n";

/// The fixture module with the `interfaces` package and vendored
/// `go/ast` and `github.com/google/uuid` stand-ins.
pub fn interfaces_fixture(root: &Path) -> GoPackageFixture {
    GoPackageFixture::new(root, MODULE)
        .and_then(|f| f.with_file("interfaces", "interfaces.go", INTERFACES_GO))
        .and_then(|f| f.with_path("vendor/go/ast/ast.go", AST_GO))
        .and_then(|f| f.with_path("vendor/github.com/google/uuid/uuid.go", UUID_GO))
        .expect("failed to write Go fixture")
}

pub fn options(interface: &str) -> GeneratorOptions {
    let query = InterfaceQuery::parse(&format!("{PACKAGE}.{interface}"))
        .expect("fixture query is well formed");
    GeneratorOptions::new(query)
}
