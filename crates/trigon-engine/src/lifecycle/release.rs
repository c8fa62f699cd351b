use std::fmt;

/// Resources owned by the renderer, in the sense of the release sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    /// Pipeline + pipeline layout: shaders, input layout and topology bound together.
    InputLayout,
    VertexBuffer,
    VertexShader,
    PixelShader,
    RenderTargetView,
    SwapChain,
    /// Immediate submission queue.
    Context,
    Device,
    /// The renderer's reference to the window. The window itself is closed
    /// by the run-loop once teardown returns.
    Window,
}

impl ResourceKind {
    /// Release sequence: everything created from the device first, then the
    /// device, then the window reference.
    pub const RELEASE_ORDER: [ResourceKind; 9] = [
        ResourceKind::InputLayout,
        ResourceKind::VertexBuffer,
        ResourceKind::VertexShader,
        ResourceKind::PixelShader,
        ResourceKind::RenderTargetView,
        ResourceKind::SwapChain,
        ResourceKind::Context,
        ResourceKind::Device,
        ResourceKind::Window,
    ];

    /// True for resources that must not outlive the device.
    pub fn depends_on_device(self) -> bool {
        !matches!(self, ResourceKind::Device | ResourceKind::Window)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::InputLayout => "input layout",
            Self::VertexBuffer => "vertex buffer",
            Self::VertexShader => "vertex shader",
            Self::PixelShader => "pixel shader",
            Self::RenderTargetView => "render target view",
            Self::SwapChain => "swap-chain",
            Self::Context => "device context",
            Self::Device => "device",
            Self::Window => "window reference",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReleaseError {
    AlreadyReleased(ResourceKind),
}

impl fmt::Display for ReleaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyReleased(kind) => write!(f, "{kind} was already released"),
        }
    }
}

impl std::error::Error for ReleaseError {}

/// Moves a resource out of its slot for release.
pub fn take<T>(slot: &mut Option<T>, kind: ResourceKind) -> Result<T, ReleaseError> {
    slot.take().ok_or(ReleaseError::AlreadyReleased(kind))
}

/// Outcome of a teardown.
#[derive(Debug, Default)]
pub struct TeardownReport {
    released: Vec<ResourceKind>,
    failures: Vec<(ResourceKind, anyhow::Error)>,
}

impl TeardownReport {
    /// Resources released cleanly, in release order.
    pub fn released(&self) -> &[ResourceKind] {
        &self.released
    }

    pub fn failures(&self) -> &[(ResourceKind, anyhow::Error)] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Calls `release` once per [`ResourceKind::RELEASE_ORDER`] entry.
///
/// Errors are logged and recorded; the remaining resources are still released.
pub fn release_all<F>(mut release: F) -> TeardownReport
where
    F: FnMut(ResourceKind) -> anyhow::Result<()>,
{
    let mut report = TeardownReport::default();

    for kind in ResourceKind::RELEASE_ORDER {
        match release(kind) {
            Ok(()) => {
                log::debug!("released {kind}");
                report.released.push(kind);
            }
            Err(e) => {
                log::warn!("failed to release {kind}: {e:#}");
                report.failures.push((kind, e));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(kind: ResourceKind) -> usize {
        ResourceKind::RELEASE_ORDER
            .iter()
            .position(|k| *k == kind)
            .unwrap()
    }

    #[test]
    fn dependents_are_released_before_device() {
        let device = position(ResourceKind::Device);
        for kind in ResourceKind::RELEASE_ORDER {
            if kind.depends_on_device() {
                assert!(position(kind) < device, "{kind} outlives the device");
            }
        }
        assert_eq!(*ResourceKind::RELEASE_ORDER.last().unwrap(), ResourceKind::Window);
        assert_eq!(ResourceKind::Window.to_string(), "window reference");
    }

    #[test]
    fn every_kind_appears_once() {
        let order = ResourceKind::RELEASE_ORDER;
        for (i, a) in order.iter().enumerate() {
            assert!(order[i + 1..].iter().all(|b| b != a), "{a} listed twice");
        }
    }

    #[test]
    fn release_all_visits_each_kind_once_in_order() {
        let mut seen = Vec::new();
        let report = release_all(|kind| {
            seen.push(kind);
            Ok(())
        });
        assert_eq!(seen, ResourceKind::RELEASE_ORDER);
        assert_eq!(report.released(), ResourceKind::RELEASE_ORDER);
        assert!(report.is_clean());
    }

    #[test]
    fn failures_do_not_stop_teardown() {
        let mut seen = Vec::new();
        let report = release_all(|kind| {
            seen.push(kind);
            if kind == ResourceKind::VertexBuffer {
                anyhow::bail!("buffer still mapped");
            }
            Ok(())
        });
        assert_eq!(seen.len(), ResourceKind::RELEASE_ORDER.len());
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.failures()[0].0, ResourceKind::VertexBuffer);
        assert!(!report.released().contains(&ResourceKind::VertexBuffer));
        assert!(report.released().contains(&ResourceKind::Device));
    }

    #[test]
    fn take_empties_the_slot() {
        let mut slot = Some(7);
        assert_eq!(take(&mut slot, ResourceKind::VertexBuffer), Ok(7));
        assert_eq!(
            take(&mut slot, ResourceKind::VertexBuffer),
            Err(ReleaseError::AlreadyReleased(ResourceKind::VertexBuffer))
        );
    }
}
