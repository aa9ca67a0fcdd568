//! The two inference phases.
//!
//! Phase one walks the argument/parameter pairs once, collecting bounds from
//! everything that already has a type. Phase two loops: output-type
//! inferences for anonymous-function and method-group arguments whose input
//! types no longer mention unfixed parameters, then fixing in dependency
//! order, until everything is fixed or no step makes progress.

use fixedbitset::FixedBitSet;
use strix_common::Diagnostic;
use strix_types::predicates::{
    contains_type_param, delegate_shape_of, is_really_a_type, named_parts, tuple_elements_of,
};
use strix_types::{DelegateParam, DelegateShape, TypeId, TypeSubstitution, instantiate_type};

use crate::argument::{BoundArgument, MethodGroup, UnboundLambda};
use crate::bounds::BoundKind;
use crate::dependency::{DependencyMatrix, dependency_state};
use crate::engine::{InferenceProgress, MethodTypeInferrer};
use crate::host::InferenceHost;

/// Which unfixed parameters a fixing pass selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FixSelector {
    /// Parameters no other unfixed parameter feeds into.
    Nondependent,
    /// Parameters some other parameter still depends on.
    Dependent,
}

impl<'a, H: InferenceHost + ?Sized> MethodTypeInferrer<'a, H> {
    // =========================================================================
    // Phase one
    // =========================================================================

    pub(crate) fn infer_type_args_first_phase(&mut self, diagnostics: &mut Vec<Diagnostic>) {
        let arguments = self.arguments;
        for index in 0..self.num_args_to_process() {
            let argument = &arguments[index];
            let target = self.formal_param_types[index];
            // Non-value pass kinds force exact inference on the argument.
            let kind = if self.ref_kind_of(index).is_by_value() {
                BoundKind::Lower
            } else {
                BoundKind::Exact
            };
            self.make_explicit_parameter_type_inferences(argument, target, kind, diagnostics);
        }
    }

    fn make_explicit_parameter_type_inferences(
        &mut self,
        argument: &'a BoundArgument,
        target: TypeId,
        kind: BoundKind,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        match argument {
            BoundArgument::Lambda(lambda) if lambda.parameter_types.is_some() => {
                self.explicit_parameter_type_inference(lambda, target);
            }
            BoundArgument::Lambda(_) => {}
            BoundArgument::TupleLiteral { elements, ty } => {
                if self.make_tuple_literal_inferences(elements, target, kind, diagnostics) {
                    return;
                }
                // Shape mismatch: fall back to the literal's natural type.
                if let Some(ty) = *ty
                    && is_really_a_type(self.types, ty)
                {
                    self.exact_or_bounds_inference(kind, ty, target);
                }
            }
            BoundArgument::Typed { ty } if is_really_a_type(self.types, *ty) => {
                self.exact_or_bounds_inference(kind, *ty, target);
            }
            _ => {}
        }
    }

    /// Element-wise phase-one recursion for a tuple literal against a
    /// tuple-compatible target of matching cardinality.
    fn make_tuple_literal_inferences(
        &mut self,
        elements: &'a [BoundArgument],
        target: TypeId,
        kind: BoundKind,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        let Some(destinations) = tuple_elements_of(self.types, target, elements.len()) else {
            return false;
        };
        for (element, destination) in elements.iter().zip(destinations) {
            self.make_explicit_parameter_type_inferences(element, destination, kind, diagnostics);
        }
        true
    }

    /// Exact inference between an explicitly typed lambda's parameter types
    /// and the target delegate's. A pass-kind mismatch does not abort; the
    /// call fails applicability later instead.
    fn explicit_parameter_type_inference(&mut self, lambda: &UnboundLambda, target: TypeId) {
        let Some(delegate) = delegate_shape_of(self.types, target) else {
            return;
        };
        let Some(parameter_types) = &lambda.parameter_types else {
            return;
        };
        let size = parameter_types.len().min(delegate.params.len());
        for i in 0..size {
            self.exact_inference(parameter_types[i], delegate.params[i].ty);
        }
    }

    // =========================================================================
    // Phase two
    // =========================================================================

    pub(crate) fn infer_type_args_second_phase(
        &mut self,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        self.initialize_dependencies();
        loop {
            match self.do_second_phase(diagnostics) {
                InferenceProgress::Success => return true,
                InferenceProgress::Failed => return false,
                _ => {}
            }
        }
    }

    fn do_second_phase(&mut self, diagnostics: &mut Vec<Diagnostic>) -> InferenceProgress {
        if self.all_fixed() {
            return InferenceProgress::Success;
        }
        self.make_output_type_inferences(diagnostics);

        let result = self.fix_parameters(FixSelector::Nondependent, diagnostics);
        if result != InferenceProgress::NoProgress {
            return result;
        }
        let result = self.fix_parameters(FixSelector::Dependent, diagnostics);
        if result != InferenceProgress::NoProgress {
            return result;
        }
        InferenceProgress::Failed
    }

    fn make_output_type_inferences(&mut self, diagnostics: &mut Vec<Diagnostic>) {
        let arguments = self.arguments;
        for index in 0..self.num_args_to_process() {
            let argument = &arguments[index];
            let formal = self.formal_param_types[index];
            self.make_output_type_inferences_for_argument(argument, formal, diagnostics);
        }
    }

    fn make_output_type_inferences_for_argument(
        &mut self,
        argument: &'a BoundArgument,
        formal: TypeId,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        // Tuple literals without a natural type recurse element-wise.
        if let BoundArgument::TupleLiteral { elements, ty: None } = argument {
            if let Some(destinations) = tuple_elements_of(self.types, formal, elements.len()) {
                for (element, destination) in elements.iter().zip(destinations) {
                    self.make_output_type_inferences_for_argument(
                        element,
                        destination,
                        diagnostics,
                    );
                }
            }
            return;
        }
        if self.has_unfixed_param_in_output_type(argument, formal)
            && !self.has_unfixed_param_in_input_type(argument, formal)
        {
            self.output_type_inference(argument, formal, diagnostics);
        }
    }

    fn output_type_inference(
        &mut self,
        argument: &BoundArgument,
        formal: TypeId,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        match argument {
            BoundArgument::Lambda(lambda) => {
                if self.inferred_return_type_inference(lambda, formal, diagnostics) {
                    return;
                }
            }
            BoundArgument::MethodGroup(group) => {
                if self.method_group_return_type_inference(group, formal, diagnostics) {
                    return;
                }
            }
            _ => {}
        }
        if let Some(source) = argument.ty()
            && is_really_a_type(self.types, source)
        {
            self.lower_bound_inference(source, formal);
        }
    }

    /// Lambda argument against a delegate target with a non-void return:
    /// bind the lambda against the fixed delegate, then lower-bound its
    /// inferred return type against the delegate's declared return.
    fn inferred_return_type_inference(
        &mut self,
        lambda: &UnboundLambda,
        formal: TypeId,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        let Some(delegate) = delegate_shape_of(self.types, formal) else {
            return false;
        };
        let return_type = delegate.return_type;
        if return_type == TypeId::VOID {
            return false;
        }
        let fixed_delegate = self.get_fixed_delegate(&delegate);
        let Some(inferred) =
            self.host
                .infer_lambda_return(self.types, lambda, &fixed_delegate, diagnostics)
        else {
            return false;
        };
        if !is_really_a_type(self.types, inferred) {
            return false;
        }
        self.lower_bound_inference(inferred, return_type);
        true
    }

    /// Method-group argument against a delegate target with a non-void
    /// return: resolve the group against the fixed parameter list, then
    /// lower-bound the chosen method's return type.
    fn method_group_return_type_inference(
        &mut self,
        group: &MethodGroup,
        formal: TypeId,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        let Some(delegate) = delegate_shape_of(self.types, formal) else {
            return false;
        };
        let return_type = delegate.return_type;
        if return_type == TypeId::VOID {
            return false;
        }
        let fixed_delegate = self.get_fixed_delegate(&delegate);
        let Some(method_return) = self.host.resolve_method_group(
            self.types,
            group,
            &fixed_delegate.params,
            diagnostics,
        ) else {
            return false;
        };
        if !is_really_a_type(self.types, method_return) {
            return false;
        }
        self.lower_bound_inference(method_return, return_type);
        true
    }

    /// Substitute currently-fixed results (and the constructed containing
    /// type's bindings) into a delegate shape. Unfixed parameters stand for
    /// themselves; they can legally appear in the outputs.
    fn get_fixed_delegate(&self, delegate: &DelegateShape) -> DelegateShape {
        let subst = self.fixed_substitution();
        if subst.is_empty() {
            return delegate.clone();
        }
        DelegateShape {
            params: delegate
                .params
                .iter()
                .map(|p| DelegateParam {
                    ty: instantiate_type(self.types, p.ty, &subst),
                    ref_kind: p.ref_kind,
                })
                .collect(),
            return_type: instantiate_type(self.types, delegate.return_type, &subst),
        }
    }

    fn fixed_substitution(&self) -> TypeSubstitution {
        let mut subst = TypeSubstitution::new();
        if let Some(containing) = self.containing_type
            && let Some((def, args)) = named_parts(self.types, containing)
        {
            let def = self.types.def(def);
            subst.extend_from_args(self.types, &def.type_params, &args);
        }
        for (index, &param) in self.method_type_params.iter().enumerate() {
            if let (Some(pid), Some(fixed)) =
                (self.types.as_type_param(param), self.fixed_results[index])
            {
                subst.insert(pid, fixed);
            }
        }
        subst
    }

    // =========================================================================
    // Input/output analysis
    // =========================================================================

    /// For a lambda or method-group argument against a delegate target, the
    /// input types are the delegate's parameter types.
    fn does_input_type_contain(
        &self,
        argument: &BoundArgument,
        formal: TypeId,
        type_param: TypeId,
    ) -> bool {
        if !matches!(
            argument,
            BoundArgument::Lambda(_) | BoundArgument::MethodGroup(_)
        ) {
            return false;
        }
        let Some(delegate) = delegate_shape_of(self.types, formal) else {
            return false;
        };
        delegate
            .params
            .iter()
            .any(|p| contains_type_param(self.types, p.ty, type_param))
    }

    /// For the same arguments, the output type is the delegate's return.
    fn does_output_type_contain(
        &self,
        argument: &BoundArgument,
        formal: TypeId,
        type_param: TypeId,
    ) -> bool {
        if !matches!(
            argument,
            BoundArgument::Lambda(_) | BoundArgument::MethodGroup(_)
        ) {
            return false;
        }
        let Some(delegate) = delegate_shape_of(self.types, formal) else {
            return false;
        };
        contains_type_param(self.types, delegate.return_type, type_param)
    }

    fn has_unfixed_param_in_input_type(&self, argument: &BoundArgument, formal: TypeId) -> bool {
        (0..self.method_type_params.len()).any(|i| {
            self.is_unfixed(i)
                && self.does_input_type_contain(argument, formal, self.method_type_params[i])
        })
    }

    fn has_unfixed_param_in_output_type(&self, argument: &BoundArgument, formal: TypeId) -> bool {
        (0..self.method_type_params.len()).any(|i| {
            self.is_unfixed(i)
                && self.does_output_type_contain(argument, formal, self.method_type_params[i])
        })
    }

    // =========================================================================
    // Dependency graph
    // =========================================================================

    /// `Xi` depends directly on `Xj` when some argument/parameter pair has
    /// `Xj` in its input types and `Xi` in its output types.
    fn depends_directly_on(&self, i: usize, j: usize) -> bool {
        let xi = self.method_type_params[i];
        let xj = self.method_type_params[j];
        let arguments = self.arguments;
        (0..self.num_args_to_process()).any(|index| {
            let argument = &arguments[index];
            let formal = self.formal_param_types[index];
            self.does_input_type_contain(argument, formal, xj)
                && self.does_output_type_contain(argument, formal, xi)
        })
    }

    fn initialize_dependencies(&mut self) {
        debug_assert!(self.dependencies.is_none());
        let n = self.method_type_params.len();
        let mut matrix = DependencyMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                if self.depends_directly_on(i, j) {
                    matrix.set(i, j, dependency_state::DIRECT);
                }
            }
        }
        matrix.deduce_all();
        self.dependencies = Some(matrix);
    }

    fn depends_on(&mut self, i: usize, j: usize) -> bool {
        let Some(matrix) = &mut self.dependencies else {
            return false;
        };
        matrix.ensure_deduced();
        matrix.depends(i, j)
    }

    fn depends_on_any(&mut self, i: usize) -> bool {
        (0..self.method_type_params.len()).any(|j| self.depends_on(i, j))
    }

    fn any_depends_on(&mut self, i: usize) -> bool {
        (0..self.method_type_params.len()).any(|j| self.depends_on(j, i))
    }

    pub(crate) fn update_dependencies_after_fix(&mut self, index: usize) {
        if let Some(matrix) = &mut self.dependencies {
            matrix.on_fixed(index);
        }
    }

    // =========================================================================
    // Fixing passes
    // =========================================================================

    /// Fix every unfixed parameter with bounds that the selector picks. A
    /// failed fix turns the whole pass into failure but the remaining
    /// parameters are still attempted, for better downstream reporting.
    fn fix_parameters(
        &mut self,
        selector: FixSelector,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> InferenceProgress {
        let n = self.method_type_params.len();
        let mut needs_fixing = FixedBitSet::with_capacity(n);
        let mut result = InferenceProgress::NoProgress;
        for index in 0..n {
            if self.is_unfixed(index) && self.has_bound(index) {
                let selected = match selector {
                    FixSelector::Nondependent => !self.depends_on_any(index),
                    FixSelector::Dependent => self.any_depends_on(index),
                };
                if selected {
                    needs_fixing.insert(index);
                    result = InferenceProgress::MadeProgress;
                }
            }
        }
        for index in needs_fixing.ones() {
            if !self.fix(index, diagnostics) {
                result = InferenceProgress::Failed;
            }
        }
        tracing::trace!(?selector, ?result, "fixing pass");
        result
    }
}
