use glam::{Mat4, Vec3};

/// Stack of composed 4x4 transforms used to build per-object model matrices.
///
/// The top entry maps the current local frame to camera space. Every
/// operation right-multiplies the top, so transforms apply in local
/// coordinates. The stack is rebuilt from scratch each frame and never
/// shared across frames.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    /// Create a stack holding a single identity matrix
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
        }
    }

    /// Replace the top matrix entirely
    pub fn set_matrix(&mut self, m: Mat4) {
        *self.top_mut() = m;
    }

    /// Current composed transform
    pub fn top(&self) -> Mat4 {
        self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Duplicate the top so later edits can be undone with `pop`
    pub fn push(&mut self) {
        self.stack.push(self.top());
    }

    /// Discard the top, restoring the previously pushed transform.
    /// Popping the root entry is a programming error; it is a no-op
    /// in release builds.
    pub fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "pop on root matrix stack entry");
        if self.stack.len() > 1 {
            let _ = self.stack.pop();
        }
    }

    /// Run `f` inside a pushed scope; the stack depth present on entry is
    /// restored on exit regardless of what `f` pushed or popped.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut MatrixStack) -> R) -> R {
        let depth = self.stack.len();
        self.push();
        let result = f(self);
        self.stack.truncate(depth);
        result
    }

    /// Right-multiply the top by an arbitrary matrix
    pub fn apply_matrix(&mut self, m: Mat4) {
        *self.top_mut() *= m;
    }

    /// Translate the local frame
    pub fn translate(&mut self, offset: Vec3) {
        self.apply_matrix(Mat4::from_translation(offset));
    }

    /// Rotate the local frame about its Y axis
    pub fn rotate_y(&mut self, degrees: f32) {
        self.apply_matrix(Mat4::from_rotation_y(degrees.to_radians()));
    }

    /// Scale the local frame
    pub fn scale(&mut self, factors: Vec3) {
        self.apply_matrix(Mat4::from_scale(factors));
    }

    /// Nesting depth, root entry included
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn starts_as_identity() {
        let stack = MatrixStack::new();
        assert_eq!(stack.top(), Mat4::IDENTITY);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_pop_restores_top() {
        let mut stack = MatrixStack::new();
        stack.translate(Vec3::new(1.0, 2.0, 3.0));
        let before = stack.top();

        stack.push();
        stack.translate(Vec3::new(10.0, 0.0, 0.0));
        assert_ne!(stack.top(), before);

        stack.pop();
        assert_eq!(stack.top(), before);
    }

    #[test]
    fn operations_apply_in_local_space() {
        let mut stack = MatrixStack::new();
        stack.translate(Vec3::new(5.0, 0.0, 0.0));
        stack.rotate_y(90.0);

        // Local origin ends up at the translation point
        let origin = stack.top() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.x - 5.0).abs() < 1e-5);

        // Local +Z maps to world +X after the 90 degree yaw, offset by
        // the earlier translation
        let z = stack.top() * Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert!((z.x - 6.0).abs() < 1e-5, "got {z:?}");
        assert!(z.z.abs() < 1e-5);
    }

    #[test]
    fn scoped_restores_depth_on_early_return() {
        let mut stack = MatrixStack::new();
        let before = stack.top();

        let _ = stack.scoped(|s| {
            s.translate(Vec3::ONE);
            s.push();
            s.scale(Vec3::splat(2.0));
            // Leave extra entries behind on purpose
            42
        });

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), before);
    }

    #[test]
    fn supports_deep_nesting() {
        let mut stack = MatrixStack::new();
        for _ in 0..1000 {
            stack.push();
            stack.translate(Vec3::X);
        }
        for _ in 0..1000 {
            stack.pop();
        }
        assert_eq!(stack.top(), Mat4::IDENTITY);
    }
}
