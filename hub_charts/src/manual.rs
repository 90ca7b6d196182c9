/*!

This is the long-form manual for `hub_charts` and `hubcharts`.

## Input data

The data comes from one Excel workbook and a few CSV files.

### The workbook

One sheet per mine hub, and one `-AAZ` sheet per hub for the alternate dataset.
The first row is the header. The item charts expect the following columns:
* `Main Sector` the sector of the supported business
* `Frequency` how many times the sector was reported
* `Total Supported` the number of jobs supported in that sector

| Location | Sheet | AAZ sheet |
|---|---|---|
| Rustenburg | `Rusty` | `Rusty-AAZ` |
| Polokwane | `Polokwane` | `Polokwane-AAZ` |
| Amandelbult | `Amanda` | `Amanda-AAZ` |
| Mogalakwena | `Mogala` | `Mogala-AAZ` |
| Twickenham | `Twik` | `Twik-AAZ` |
| Mototolo | `Mototolo` | `Moto-AAZ` |

The location `Interview-Data` is read from `Cleaned-Interview-Data.csv` instead.

### The survey

A CSV file with one row per respondent. The `Hub` column tells which hub the
respondent belongs to. The score columns are named `<Category>: <Label>`, for
example `Technology: Cost`. The categories offered for selection are the
distinct `<Category>` parts, except for the `Have:` columns.

### Cell values

Numbers are numbers, everything else is text, except for the missing values:
blank cells and the usual markers (`NaN`, `NA`, `N/A`, `null`, `None`, `#N/A`, ...,
see `builder::NA_VALUES`). Rows with a missing main sector are left out of the
sector charts.
Averages and sums only look at the numbers: a missing or text value does not
count, neither in the total nor in the number of values.

## Charts

### Pie

A semi-circular donut with one slice per score column of the selected category,
restricted to the rows of the selected hub. The value of a slice is the average
score. The slices can display either their share of the total
(`ValueDisplay::Percentage`, the default) or the average itself
(`ValueDisplay::Value`).

### Item

A semi-circular pictogram with one point per main sector, in alphabetical order.
The metric is `Frequency` when the selector mentions `Frequency`, and
`Total Supported` otherwise. Each point is labelled with the initials of its
sector name (`Wholesale Trade` is `WT`). Under a width of 600 pixels, the labels
move inside the chart.

## Missing data

If a selection has nothing to plot (no column for the category, no sector), the
builders return `None` and the chart is left out with a warning. Missing columns
and unknown locations are errors.

*/
