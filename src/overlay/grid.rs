use crate::{
    foundation::{
        core::{Millis, Point, Size},
        error::{FolioError, FolioResult},
    },
    overlay::config::OverlayConfig,
};

/// Delay between consecutive cells of one cluster chain.
pub const CHAIN_STEP: Millis = Millis(50);

/// Upper bound on cells per overlay; larger hosts are rejected at mount.
pub const MAX_CELLS: usize = 1 << 20;

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub col: usize,
    pub row: usize,
    /// Centre in host coordinates, always inside the host.
    pub centre: Point,
    /// `None` for an empty cell.
    pub symbol: Option<char>,
    pub scrambles: bool,
    pub visible: bool,
    pub active_until: Option<Millis>,
    /// Next due time of the cell's scramble task, if one is running.
    scramble_due: Option<Millis>,
}

impl GridCell {
    pub fn is_scrambling(&self) -> bool {
        self.scramble_due.is_some()
    }
}

/// A grid of symbol cells over a host element, lit in small clusters by the pointer.
///
/// All timing is driven by the host through [`GridOverlay::on_pointer_move`]
/// and [`GridOverlay::on_frame`]. After [`GridOverlay::unmount`] both are inert.
#[derive(Debug)]
pub struct GridOverlay {
    config: OverlayConfig,
    cols: usize,
    rows: usize,
    cells: Vec<GridCell>,
    /// Pending chain activations `(due, cell index)`, in due order.
    chain: Vec<(Millis, usize)>,
    rng: fastrand::Rng,
    alive: bool,
}

impl GridOverlay {
    #[tracing::instrument(skip(config))]
    pub fn mount(host: Size, config: OverlayConfig) -> FolioResult<Self> {
        config.validate()?;
        if !(host.width.is_finite() && host.height.is_finite())
            || host.width < 0.0
            || host.height < 0.0
        {
            return Err(FolioError::configuration(format!(
                "host size must be finite and non-negative, got {}x{}",
                host.width, host.height
            )));
        }
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let s = config.block_size;
        let (cols_f, rows_f) = ((host.width / s).ceil(), (host.height / s).ceil());
        let cell_count = (cols_f * rows_f <= MAX_CELLS as f64)
            .then(|| (cols_f as usize).checked_mul(rows_f as usize))
            .flatten()
            .filter(|n| *n <= MAX_CELLS)
            .ok_or_else(|| {
                FolioError::configuration(format!(
                    "host {}x{} at block size {s} exceeds {MAX_CELLS} cells",
                    host.width, host.height
                ))
            })?;
        let cols = cols_f as usize;
        let rows = rows_f as usize;
        let centre_of = |i: usize, extent: f64| {
            let lo = i as f64 * s;
            (lo + (lo + s).min(extent)) / 2.0
        };

        let mut cells = Vec::with_capacity(cell_count);
        for row in 0..rows {
            for col in 0..cols {
                let empty = rng.f64() < config.empty_ratio;
                let symbol = if empty {
                    None
                } else {
                    pick_symbol(&mut rng, &config.symbols)
                };
                cells.push(GridCell {
                    col,
                    row,
                    centre: Point::new(centre_of(col, host.width), centre_of(row, host.height)),
                    symbol,
                    scrambles: rng.f64() < config.scramble_ratio,
                    visible: false,
                    active_until: None,
                    scramble_due: None,
                });
            }
        }
        tracing::debug!(cols, rows, "grid overlay mounted");
        Ok(Self {
            config,
            cols,
            rows,
            cells,
            chain: Vec::new(),
            rng,
            alive: true,
        })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&GridCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn is_mounted(&self) -> bool {
        self.alive
    }

    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.visible).count()
    }

    /// Chain activations not yet due, in due order.
    pub fn pending_chain(&self) -> impl Iterator<Item = (Millis, &GridCell)> + '_ {
        self.chain.iter().map(|(due, i)| (*due, &self.cells[*i]))
    }

    /// Index of the cell whose centre is nearest to `p`, if strictly within the radius.
    fn nearest(&self, p: Point) -> Option<usize> {
        let mut best = None;
        let mut best_dist = self.config.detection_radius;
        for (i, cell) in self.cells.iter().enumerate() {
            let d = cell.centre.distance(p);
            if d < best_dist {
                best_dist = d;
                best = Some(i);
            }
        }
        best
    }

    /// Light the cell under the pointer and queue its cluster chain.
    ///
    /// A trigger while an earlier chain is still pending replaces that chain.
    pub fn on_pointer_move(&mut self, p: Point, now: Millis) {
        if !self.alive || !(p.x.is_finite() && p.y.is_finite()) {
            return;
        }
        let Some(start) = self.nearest(p) else {
            return;
        };
        if !self.chain.is_empty() {
            tracing::trace!(dropped = self.chain.len(), "restarting cluster chain");
            self.chain.clear();
        }
        self.activate_index(start, now);

        let mut chosen = vec![start];
        let mut current = start;
        for k in 1..self.config.cluster_size {
            let candidates: Vec<usize> = self
                .neighbours(current)
                .filter(|n| !chosen.contains(n))
                .collect();
            if candidates.is_empty() {
                break;
            }
            let next = candidates[self.rng.usize(..candidates.len())];
            chosen.push(next);
            self.chain.push((
                now.saturating_add(Millis(CHAIN_STEP.0 * k as u64)),
                next,
            ));
            current = next;
        }
    }

    fn neighbours(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (col, row) = (index % self.cols, index / self.cols);
        (-1i64..=1)
            .flat_map(|dr| (-1i64..=1).map(move |dc| (dc, dr)))
            .filter(|&(dc, dr)| (dc, dr) != (0, 0))
            .filter_map(move |(dc, dr)| {
                let c = col as i64 + dc;
                let r = row as i64 + dr;
                (c >= 0 && r >= 0 && (c as usize) < self.cols && (r as usize) < self.rows)
                    .then(|| r as usize * self.cols + c as usize)
            })
    }

    /// Make the cell at `(col, row)` visible for one lifetime from `now`.
    pub fn activate_cell(&mut self, col: usize, row: usize, now: Millis) -> FolioResult<()> {
        if !self.alive {
            return Err(FolioError::validation("grid overlay has been unmounted"));
        }
        if col >= self.cols || row >= self.rows {
            return Err(FolioError::validation(format!(
                "cell ({col}, {row}) is outside the {}x{} grid",
                self.cols, self.rows
            )));
        }
        self.activate_index(row * self.cols + col, now);
        Ok(())
    }

    fn activate_index(&mut self, index: usize, now: Millis) {
        let lifetime = Millis(self.config.block_lifetime_ms);
        let interval = Millis(self.config.scramble_interval_ms);
        let cell = &mut self.cells[index];
        cell.visible = true;
        cell.active_until = Some(now.saturating_add(lifetime));
        if cell.scrambles && cell.symbol.is_some() && cell.scramble_due.is_none() {
            cell.scramble_due = Some(now.saturating_add(interval));
        }
    }

    /// Run due chain activations, then due scramble ticks, then hide expired cells.
    pub fn on_frame(&mut self, now: Millis) {
        if !self.alive {
            return;
        }
        let due = self.chain.partition_point(|(at, _)| *at <= now);
        let ready: Vec<_> = self.chain.drain(..due).collect();
        for (at, index) in ready {
            self.activate_index(index, at);
        }

        let interval = self.config.scramble_interval_ms.max(1);
        for i in 0..self.cells.len() {
            let Some(at) = self.cells[i].scramble_due else {
                continue;
            };
            if at > now {
                continue;
            }
            let symbol = pick_symbol(&mut self.rng, &self.config.symbols);
            let cell = &mut self.cells[i];
            if symbol.is_some() {
                cell.symbol = symbol;
            }
            let missed = now.saturating_sub(at).0 / interval;
            cell.scramble_due = Some(Millis(at.0 + (missed + 1) * interval));
        }

        for cell in &mut self.cells {
            if cell.active_until.is_some_and(|until| until <= now) {
                cell.visible = false;
                cell.active_until = None;
                cell.scramble_due = None;
            }
        }
    }

    /// Cancel pending work and drop every cell. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if self.alive {
            tracing::debug!(cells = self.cells.len(), "grid overlay unmounted");
        }
        self.chain.clear();
        self.cells.clear();
        self.cols = 0;
        self.rows = 0;
        self.alive = false;
    }

    /// One line per row: the symbol for lit cells, `_` for lit empty cells,
    /// `.` for hidden ones.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                out.push(match (cell.visible, cell.symbol) {
                    (false, _) => '.',
                    (true, Some(c)) => c,
                    (true, None) => '_',
                });
            }
            out.push('\n');
        }
        out
    }
}

fn pick_symbol(rng: &mut fastrand::Rng, symbols: &[char]) -> Option<char> {
    if symbols.is_empty() {
        return None;
    }
    Some(symbols[rng.usize(..symbols.len())])
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/grid.rs"]
mod tests;
